//! List-page state machine: paging, search, selection, and modal state.
//!
//! All mutation goes through [`ListPageState::apply`], which returns the
//! side effect (if any) the caller must dispatch to the backend worker.
//! Every fetch intent carries a generation number; responses for anything
//! but the newest issued generation are discarded, so the displayed page
//! always reflects the most recent (page, search) request regardless of
//! response arrival order.

use shared::{
    domain::{Vehicle, VehicleId},
    protocol::VehiclePage,
};

/// Fixed backend page size; the listing response reports a page count, so
/// the approximate record total shown in the footer is `PAGE_SIZE * pages`.
pub const PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    None,
    Form(FormMode),
    ConfirmDelete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchIntent {
    pub page: u32,
    pub search: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Started,
    PageSelected(u32),
    SearchEdited(String),
    PageLoaded { generation: u64, page: VehiclePage },
    PageLoadFailed { generation: u64, message: String },
    NewRequested,
    EditRequested(VehicleId),
    DeleteRequested(VehicleId),
    DeleteConfirmed,
    MutationSaved,
    MutationFailed(String),
    ModalDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(FetchIntent),
    Delete(VehicleId),
}

/// Flat row projection fed to the grid. `name` joins make and model; the
/// delete confirmation uses [`confirmation_display_name`] instead, which
/// additionally leads with the release year. The two derivations are
/// intentionally distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub id: VehicleId,
    pub name: String,
    pub size: String,
    pub style: String,
    pub transmission_type: String,
    pub price: i64,
    pub release_date: i32,
}

impl From<&Vehicle> for GridRow {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            name: format!("{} {}", vehicle.make, vehicle.model),
            size: vehicle.size.clone(),
            style: vehicle.style.clone(),
            transmission_type: vehicle.transmission_type.clone(),
            price: vehicle.price,
            release_date: vehicle.release_date,
        }
    }
}

pub fn confirmation_display_name(vehicle: &Vehicle) -> String {
    format!(
        "{} {} {}",
        vehicle.release_date, vehicle.make, vehicle.model
    )
}

pub struct ListPageState {
    pub page: u32,
    pub total_pages: u32,
    pub search_query: String,
    pub vehicles: Vec<Vehicle>,
    pub status: FetchStatus,
    pub selection: Option<Vehicle>,
    pub modal: ModalState,
    last_issued_generation: u64,
}

impl Default for ListPageState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListPageState {
    pub fn new() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            search_query: String::new(),
            vehicles: Vec::new(),
            status: FetchStatus::Idle,
            selection: None,
            modal: ModalState::None,
            last_issued_generation: 0,
        }
    }

    /// Page count the selector renders; never below one.
    pub fn page_count(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn approximate_total_rows(&self) -> u32 {
        PAGE_SIZE * self.total_pages
    }

    pub fn grid_rows(&self) -> Vec<GridRow> {
        self.vehicles.iter().map(GridRow::from).collect()
    }

    pub fn is_latest_generation(&self, generation: u64) -> bool {
        generation == self.last_issued_generation
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    fn issue_fetch(&mut self) -> Effect {
        self.last_issued_generation += 1;
        self.status = FetchStatus::Loading;
        Effect::Fetch(FetchIntent {
            page: self.page,
            search: self.search_query.clone(),
            generation: self.last_issued_generation,
        })
    }

    fn find_vehicle(&self, id: &VehicleId) -> Option<Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id).cloned()
    }

    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Started => Some(self.issue_fetch()),
            Action::PageSelected(page) => {
                if page < 1 || page > self.page_count() {
                    return None;
                }
                self.page = page;
                Some(self.issue_fetch())
            }
            Action::SearchEdited(query) => {
                if query == self.search_query {
                    return None;
                }
                // The page is deliberately not reset to 1 here; if the new
                // query has fewer pages, the clamp in PageLoaded corrects it.
                self.search_query = query;
                Some(self.issue_fetch())
            }
            Action::PageLoaded { generation, page } => {
                if !self.is_latest_generation(generation) {
                    return None;
                }
                self.vehicles = page.data;
                self.total_pages = page.total;
                self.status = FetchStatus::Loaded;
                if self.page > self.page_count() {
                    self.page = self.page_count();
                    return Some(self.issue_fetch());
                }
                None
            }
            Action::PageLoadFailed {
                generation,
                message,
            } => {
                if !self.is_latest_generation(generation) {
                    return None;
                }
                // Previously fetched rows stay visible; the failure is
                // surfaced through the status banner.
                self.status = FetchStatus::Failed(message);
                None
            }
            Action::NewRequested => {
                self.selection = None;
                self.modal = ModalState::Form(FormMode::Create);
                None
            }
            Action::EditRequested(id) => {
                if let Some(vehicle) = self.find_vehicle(&id) {
                    self.selection = Some(vehicle);
                    self.modal = ModalState::Form(FormMode::Edit);
                }
                None
            }
            Action::DeleteRequested(id) => {
                if let Some(vehicle) = self.find_vehicle(&id) {
                    self.selection = Some(vehicle);
                    self.modal = ModalState::ConfirmDelete;
                }
                None
            }
            Action::DeleteConfirmed => {
                self.modal = ModalState::None;
                // Selection is kept until the outcome event arrives so a
                // failure banner can still name the record.
                self.selection
                    .as_ref()
                    .map(|vehicle| Effect::Delete(vehicle.id.clone()))
            }
            Action::MutationSaved => {
                self.modal = ModalState::None;
                self.selection = None;
                Some(self.issue_fetch())
            }
            Action::MutationFailed(_) => {
                // The form modal stays open so in-progress edits are not
                // lost; a failed delete has already closed its modal.
                if self.modal == ModalState::ConfirmDelete {
                    self.modal = ModalState::None;
                }
                None
            }
            Action::ModalDismissed => {
                self.modal = ModalState::None;
                self.selection = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, make: &str, model: &str) -> Vehicle {
        Vehicle {
            id: VehicleId(id.to_string()),
            make: make.to_string(),
            model: model.to_string(),
            style: "Sedan".to_string(),
            size: "Compact".to_string(),
            transmission_type: "AUTOMATIC".to_string(),
            price: 20000,
            release_date: 2020,
        }
    }

    fn loaded_page(records: Vec<Vehicle>, total: u32) -> VehiclePage {
        VehiclePage {
            data: records,
            total,
        }
    }

    fn fetch_intent(effect: Option<Effect>) -> FetchIntent {
        match effect {
            Some(Effect::Fetch(intent)) => intent,
            other => panic!("expected fetch effect, got {other:?}"),
        }
    }

    fn started_state(records: Vec<Vehicle>, total: u32) -> ListPageState {
        let mut state = ListPageState::new();
        let intent = fetch_intent(state.apply(Action::Started));
        assert!(state
            .apply(Action::PageLoaded {
                generation: intent.generation,
                page: loaded_page(records, total),
            })
            .is_none());
        state
    }

    #[test]
    fn start_issues_fetch_for_first_page_with_empty_query() {
        let mut state = ListPageState::new();
        let intent = fetch_intent(state.apply(Action::Started));
        assert_eq!(intent.page, 1);
        assert_eq!(intent.search, "");
        assert!(state.is_loading());
    }

    #[test]
    fn selecting_a_valid_page_fetches_it_with_current_query() {
        let mut state = started_state(vec![vehicle("a", "Toyota", "Corolla")], 4);
        let intent = fetch_intent(state.apply(Action::SearchEdited("civic".to_string())));
        assert_eq!(intent.search, "civic");

        let intent = fetch_intent(state.apply(Action::PageSelected(3)));
        assert_eq!(intent.page, 3);
        assert_eq!(intent.search, "civic");
    }

    #[test]
    fn selecting_an_out_of_range_page_is_rejected() {
        let mut state = started_state(Vec::new(), 4);
        assert!(state.apply(Action::PageSelected(5)).is_none());
        assert!(state.apply(Action::PageSelected(0)).is_none());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn search_edit_keeps_current_page() {
        let mut state = started_state(Vec::new(), 4);
        fetch_intent(state.apply(Action::PageSelected(2)));

        let intent = fetch_intent(state.apply(Action::SearchEdited("civic".to_string())));
        assert_eq!(intent.page, 2);
        assert_eq!(intent.search, "civic");
    }

    #[test]
    fn stale_response_is_discarded_wholesale() {
        let mut state = ListPageState::new();
        let first = fetch_intent(state.apply(Action::Started));
        let second = fetch_intent(state.apply(Action::SearchEdited("civic".to_string())));
        assert!(second.generation > first.generation);

        // The older in-flight response lands after the newer request was
        // issued; nothing about it may be applied.
        assert!(state
            .apply(Action::PageLoaded {
                generation: first.generation,
                page: loaded_page(vec![vehicle("stale", "Old", "Stale")], 9),
            })
            .is_none());
        assert!(state.vehicles.is_empty());
        assert_eq!(state.total_pages, 1);
        assert!(state.is_loading());

        assert!(state
            .apply(Action::PageLoaded {
                generation: second.generation,
                page: loaded_page(vec![vehicle("fresh", "Honda", "Civic")], 2),
            })
            .is_none());
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(state.total_pages, 2);
        assert_eq!(state.status, FetchStatus::Loaded);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut state = ListPageState::new();
        let first = fetch_intent(state.apply(Action::Started));
        let second = fetch_intent(state.apply(Action::SearchEdited("x".to_string())));

        assert!(state
            .apply(Action::PageLoadFailed {
                generation: first.generation,
                message: "connection refused".to_string(),
            })
            .is_none());
        assert!(state.is_loading());

        assert!(state
            .apply(Action::PageLoadFailed {
                generation: second.generation,
                message: "connection refused".to_string(),
            })
            .is_none());
        assert_eq!(
            state.status,
            FetchStatus::Failed("connection refused".to_string())
        );
    }

    #[test]
    fn shrunken_result_set_clamps_page_and_refetches_once() {
        let mut state = started_state(Vec::new(), 4);
        fetch_intent(state.apply(Action::PageSelected(4)));
        let intent = fetch_intent(state.apply(Action::SearchEdited("civic".to_string())));
        assert_eq!(intent.page, 4);

        let follow_up = fetch_intent(state.apply(Action::PageLoaded {
            generation: intent.generation,
            page: loaded_page(Vec::new(), 2),
        }));
        assert_eq!(follow_up.page, 2);
        assert_eq!(follow_up.search, "civic");
        assert_eq!(state.page, 2);
    }

    #[test]
    fn confirmed_delete_emits_delete_then_saved_refetches_current_page() {
        let mut state = started_state(vec![vehicle("v1", "Toyota", "Corolla")], 1);

        assert!(state
            .apply(Action::DeleteRequested(VehicleId("v1".to_string())))
            .is_none());
        assert_eq!(state.modal, ModalState::ConfirmDelete);

        let effect = state.apply(Action::DeleteConfirmed);
        assert_eq!(effect, Some(Effect::Delete(VehicleId("v1".to_string()))));
        assert_eq!(state.modal, ModalState::None);
        assert!(state.selection.is_some());

        let intent = fetch_intent(state.apply(Action::MutationSaved));
        assert_eq!(intent.page, 1);
        assert!(state.selection.is_none());
    }

    #[test]
    fn saved_edit_closes_form_clears_selection_and_refetches() {
        let mut state = started_state(vec![vehicle("v1", "Toyota", "Corolla")], 3);
        fetch_intent(state.apply(Action::PageSelected(2)));

        assert!(state
            .apply(Action::EditRequested(VehicleId("v1".to_string())))
            .is_none());
        assert_eq!(state.modal, ModalState::Form(FormMode::Edit));
        assert!(state.selection.is_some());

        let intent = fetch_intent(state.apply(Action::MutationSaved));
        assert_eq!(intent.page, 2);
        assert_eq!(state.modal, ModalState::None);
        assert!(state.selection.is_none());
    }

    #[test]
    fn failed_save_keeps_form_open_with_selection() {
        let mut state = started_state(vec![vehicle("v1", "Toyota", "Corolla")], 1);
        state.apply(Action::EditRequested(VehicleId("v1".to_string())));

        assert!(state
            .apply(Action::MutationFailed("validation".to_string()))
            .is_none());
        assert_eq!(state.modal, ModalState::Form(FormMode::Edit));
        assert!(state.selection.is_some());
    }

    #[test]
    fn dismissing_a_modal_clears_selection_without_fetching() {
        let mut state = started_state(vec![vehicle("v1", "Toyota", "Corolla")], 1);
        state.apply(Action::DeleteRequested(VehicleId("v1".to_string())));

        assert!(state.apply(Action::ModalDismissed).is_none());
        assert_eq!(state.modal, ModalState::None);
        assert!(state.selection.is_none());
    }

    #[test]
    fn edit_request_for_unknown_id_is_ignored() {
        let mut state = started_state(vec![vehicle("v1", "Toyota", "Corolla")], 1);
        assert!(state
            .apply(Action::EditRequested(VehicleId("nope".to_string())))
            .is_none());
        assert_eq!(state.modal, ModalState::None);
        assert!(state.selection.is_none());
    }

    #[test]
    fn grid_row_name_joins_make_and_model() {
        let row = GridRow::from(&vehicle("v1", "Toyota", "Corolla"));
        assert_eq!(row.name, "Toyota Corolla");
        assert_eq!(row.transmission_type, "AUTOMATIC");
        assert_eq!(row.price, 20000);
    }

    #[test]
    fn confirmation_name_leads_with_release_year() {
        assert_eq!(
            confirmation_display_name(&vehicle("v1", "Toyota", "Corolla")),
            "2020 Toyota Corolla"
        );
    }

    #[test]
    fn three_records_over_four_pages_shows_twenty_approximate_rows() {
        let state = started_state(
            vec![
                vehicle("a", "Toyota", "Corolla"),
                vehicle("b", "Honda", "Civic"),
                vehicle("c", "Mazda", "3"),
            ],
            4,
        );
        assert_eq!(state.grid_rows().len(), 3);
        assert_eq!(state.page_count(), 4);
        assert_eq!(state.approximate_total_rows(), 20);
    }
}
