//! App shell: search bar, vehicle grid, pagination, status banner, and the
//! form/confirmation modal windows. All list state lives in the controller
//! reducer; this layer renders it and feeds user input back as actions.

use std::collections::BTreeMap;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::protocol::VehicleDraft;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_fetch_failure, err_label, UiErrorContext, UiEvent};
use crate::controller::orchestration::{command_for_effect, dispatch_backend_command};
use crate::controller::reducer::{
    confirmation_display_name, Action, FetchStatus, FormMode, ListPageState, ModalState,
};

pub const SETTINGS_STORAGE_KEY: &str = "catalog_desktop_settings";

const MIN_TEXT_SCALE: f32 = 0.8;
const MAX_TEXT_SCALE: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedCatalogSettings {
    pub text_scale: f32,
}

impl Default for PersistedCatalogSettings {
    fn default() -> Self {
        Self { text_scale: 1.0 }
    }
}

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    list: ListPageState,
    form_draft: VehicleDraft,

    status: String,
    status_banner: Option<StatusBanner>,
    server_url: String,

    text_scale: f32,
    applied_text_scale: Option<f32>,

    started: bool,
}

impl CatalogApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedCatalogSettings>,
        startup: StartupConfig,
    ) -> Self {
        let text_scale = persisted
            .unwrap_or_default()
            .text_scale
            .clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE);
        Self {
            cmd_tx,
            ui_rx,
            list: ListPageState::new(),
            form_draft: VehicleDraft::default(),
            status: "Connecting to catalog...".to_string(),
            status_banner: None,
            server_url: startup.server_url,
            text_scale,
            applied_text_scale: None,
            started: false,
        }
    }

    fn apply(&mut self, action: Action) {
        if let Some(effect) = self.list.apply(action) {
            dispatch_backend_command(&self.cmd_tx, command_for_effect(effect), &mut self.status);
        }
    }

    fn raise_error_banner(&mut self, message: String) {
        self.status = message.clone();
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message,
        });
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::PageLoaded { generation, page } => {
                    if !self.list.is_latest_generation(generation) {
                        continue;
                    }
                    self.apply(Action::PageLoaded { generation, page });
                    self.status =
                        format!("Page {} of {}", self.list.page, self.list.page_count());
                }
                UiEvent::PageLoadFailed { generation, error } => {
                    if !self.list.is_latest_generation(generation) {
                        continue;
                    }
                    self.apply(Action::PageLoadFailed {
                        generation,
                        message: error.message().to_string(),
                    });
                    self.raise_error_banner(classify_fetch_failure(error.message()));
                }
                UiEvent::VehicleSaved => {
                    self.status = "Vehicle saved".to_string();
                    self.apply(Action::MutationSaved);
                }
                UiEvent::VehicleDeleted => {
                    self.status = "Vehicle deleted".to_string();
                    self.apply(Action::MutationSaved);
                }
                UiEvent::MutationFailed(err) => {
                    self.apply(Action::MutationFailed(err.message().to_string()));
                    self.raise_error_banner(format!(
                        "{} error: {}",
                        err_label(err.category()),
                        err.message()
                    ));
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    let message = if err.context() == UiErrorContext::BackendStartup {
                        classify_fetch_failure(err.message())
                    } else {
                        format!("{} error: {}", err_label(err.category()), err.message())
                    };
                    self.raise_error_banner(message);
                }
            }
        }
    }

    fn apply_text_scale_if_needed(&mut self, ctx: &egui::Context) {
        let scale = self.text_scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE);
        if self.applied_text_scale == Some(scale) {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.text_styles = scaled_text_styles(scale);
        ctx.set_style(style);
        self.applied_text_scale = Some(scale);
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(10, 6))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(4.0);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("catalog_top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Vehicle Catalog");
                ui.separator();
                let mut query = self.list.search_query.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .id_salt("catalog_search")
                        .hint_text("Search by name...")
                        .desired_width(240.0),
                );
                if response.changed() {
                    self.apply(Action::SearchEdited(query));
                }
                if self.list.is_loading() {
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("New vehicle").clicked() {
                        self.form_draft = VehicleDraft::default();
                        self.apply(Action::NewRequested);
                    }
                    ui.weak(&self.server_url);
                });
            });
            ui.add_space(6.0);
            self.show_status_banner(ui);
        });
    }

    fn show_bottom_bar(&mut self, ctx: &egui::Context) {
        let mut selected_page = None;
        egui::TopBottomPanel::bottom("catalog_bottom_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let current = self.list.page;
                let pages = self.list.page_count();
                if ui
                    .add_enabled(current > 1, egui::Button::new("<").small())
                    .clicked()
                {
                    selected_page = Some(current - 1);
                }
                for n in 1..=pages {
                    if ui.selectable_label(n == current, n.to_string()).clicked() {
                        selected_page = Some(n);
                    }
                }
                if ui
                    .add_enabled(current < pages, egui::Button::new(">").small())
                    .clicked()
                {
                    selected_page = Some(current + 1);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Slider::new(&mut self.text_scale, MIN_TEXT_SCALE..=MAX_TEXT_SCALE)
                            .text("Text"),
                    );
                    ui.separator();
                    ui.weak(format!(
                        "{} on this page | ~{} total",
                        self.list.vehicles.len(),
                        self.list.approximate_total_rows()
                    ));
                });
            });
            ui.add_space(2.0);
            ui.label(&self.status);
            ui.add_space(4.0);
        });
        if let Some(page) = selected_page {
            self.apply(Action::PageSelected(page));
        }
    }

    fn show_vehicle_grid(&mut self, ctx: &egui::Context) {
        let mut edit_clicked = None;
        let mut delete_clicked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let FetchStatus::Failed(message) = &self.list.status {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("Last fetch failed: {message}"),
                );
                ui.add_space(4.0);
            }

            let rows = self.list.grid_rows();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("vehicle_grid")
                        .striped(true)
                        .num_columns(7)
                        .spacing([18.0, 8.0])
                        .show(ui, |ui| {
                            ui.strong("Name");
                            ui.strong("Style");
                            ui.strong("Size");
                            ui.strong("Transmission");
                            ui.strong("Price");
                            ui.strong("Year");
                            ui.strong("");
                            ui.end_row();

                            for row in &rows {
                                ui.label(&row.name);
                                ui.label(&row.style);
                                ui.label(&row.size);
                                ui.label(&row.transmission_type);
                                ui.label(format_price(row.price));
                                ui.label(row.release_date.to_string());
                                ui.horizontal(|ui| {
                                    if ui.small_button("Edit").clicked() {
                                        edit_clicked = Some(row.id.clone());
                                    }
                                    if ui.small_button("Delete").clicked() {
                                        delete_clicked = Some(row.id.clone());
                                    }
                                });
                                ui.end_row();
                            }
                        });

                    if rows.is_empty() && self.list.status == FetchStatus::Loaded {
                        ui.add_space(12.0);
                        ui.weak("No vehicles match the current page and search.");
                    }
                });
        });

        if let Some(id) = edit_clicked {
            self.apply(Action::EditRequested(id));
            if let Some(selected) = &self.list.selection {
                self.form_draft = VehicleDraft::from_vehicle(selected);
            }
        }
        if let Some(id) = delete_clicked {
            self.apply(Action::DeleteRequested(id));
        }
    }

    fn show_form_modal(&mut self, ctx: &egui::Context) {
        let mode = match self.list.modal {
            ModalState::Form(mode) => mode,
            _ => return,
        };
        let title = match mode {
            FormMode::Create => "New vehicle",
            FormMode::Edit => "Edit vehicle",
        };
        let mut save_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("vehicle_form")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Make");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_draft.make)
                                .id_salt("form_make"),
                        );
                        ui.end_row();
                        ui.label("Model");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_draft.model)
                                .id_salt("form_model"),
                        );
                        ui.end_row();
                        ui.label("Style");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_draft.style)
                                .id_salt("form_style"),
                        );
                        ui.end_row();
                        ui.label("Size");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_draft.size)
                                .id_salt("form_size"),
                        );
                        ui.end_row();
                        ui.label("Transmission");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form_draft.transmission_type)
                                .id_salt("form_transmission"),
                        );
                        ui.end_row();
                        ui.label("Price");
                        ui.add(
                            egui::DragValue::new(&mut self.form_draft.price)
                                .range(0..=5_000_000)
                                .speed(250),
                        );
                        ui.end_row();
                        ui.label("Year");
                        ui.add(
                            egui::DragValue::new(&mut self.form_draft.release_date)
                                .range(1900..=2035),
                        );
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let can_save = !self.form_draft.make.trim().is_empty()
                        && !self.form_draft.model.trim().is_empty();
                    if ui
                        .add_enabled(can_save, egui::Button::new("Save"))
                        .clicked()
                    {
                        save_clicked = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if save_clicked {
            self.submit_form(mode);
        } else if cancel_clicked {
            self.apply(Action::ModalDismissed);
        }
    }

    fn submit_form(&mut self, mode: FormMode) {
        let draft = self.form_draft.clone();
        let command = match mode {
            FormMode::Create => BackendCommand::CreateVehicle { draft },
            FormMode::Edit => match &self.list.selection {
                Some(selected) => BackendCommand::UpdateVehicle {
                    id: selected.id.clone(),
                    draft,
                },
                None => return,
            },
        };
        self.status = "Saving vehicle...".to_string();
        dispatch_backend_command(&self.cmd_tx, command, &mut self.status);
    }

    fn show_confirm_modal(&mut self, ctx: &egui::Context) {
        if self.list.modal != ModalState::ConfirmDelete {
            return;
        }
        let name = self
            .list
            .selection
            .as_ref()
            .map(confirmation_display_name)
            .unwrap_or_default();
        let mut confirm_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Delete {name}?"));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirm_clicked = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if confirm_clicked {
            self.status = format!("Deleting {name}...");
            self.apply(Action::DeleteConfirmed);
        } else if cancel_clicked {
            self.apply(Action::ModalDismissed);
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.started {
            self.started = true;
            self.apply(Action::Started);
        }

        self.process_ui_events();
        self.apply_text_scale_if_needed(ctx);

        self.show_top_bar(ctx);
        self.show_bottom_bar(ctx);
        self.show_vehicle_grid(ctx);
        self.show_form_modal(ctx);
        self.show_confirm_modal(ctx);

        // Worker events arrive between frames; poll at a steady cadence.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedCatalogSettings {
            text_scale: self.text_scale,
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

fn format_price(price: i64) -> String {
    let negative = price < 0;
    let mut digits = price.unsigned_abs().to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{tail},{grouped}")
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{digits},{grouped}")
    };
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_price, PersistedCatalogSettings};

    #[test]
    fn formats_prices_with_thousands_separators() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(950), "$950");
        assert_eq!(format_price(20000), "$20,000");
        assert_eq!(format_price(1234567), "$1,234,567");
        assert_eq!(format_price(-4500), "-$4,500");
    }

    #[test]
    fn persisted_settings_default_to_unscaled_text() {
        let settings: PersistedCatalogSettings = serde_json::from_str("{}").expect("defaults");
        assert_eq!(settings.text_scale, 1.0);
    }
}
