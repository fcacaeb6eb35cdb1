//! Backend worker: a dedicated thread running a tokio runtime that drains the
//! UI command queue, performs catalog REST calls, and emits UI events.

use std::thread;

use anyhow::Context as _;
use client_core::CatalogClient;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build backend runtime")
}

pub fn spawn_backend_thread(
    server_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match build_runtime() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("failed to build backend runtime: {err:#}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = CatalogClient::new(server_url);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            // Commands are processed one at a time; the reducer's generation
            // guard handles fetches that were queued behind a superseded one.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchPage {
                        page,
                        search,
                        generation,
                    } => match client.fetch_page(page, &search).await {
                        Ok(body) => {
                            let _ = ui_tx.try_send(UiEvent::PageLoaded {
                                generation,
                                page: body,
                            });
                        }
                        Err(err) => {
                            tracing::warn!(page, %search, "page fetch failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::PageLoadFailed {
                                generation,
                                error: UiError::from_message(
                                    UiErrorContext::FetchPage,
                                    err.to_string(),
                                ),
                            });
                        }
                    },
                    BackendCommand::CreateVehicle { draft } => {
                        match client.create_vehicle(&draft).await {
                            Ok(created) => {
                                tracing::info!(vehicle_id = %created.id, "vehicle created");
                                let _ = ui_tx.try_send(UiEvent::VehicleSaved);
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::MutationFailed(
                                    UiError::from_message(
                                        UiErrorContext::SaveVehicle,
                                        err.to_string(),
                                    ),
                                ));
                            }
                        }
                    }
                    BackendCommand::UpdateVehicle { id, draft } => {
                        match client.update_vehicle(&id, &draft).await {
                            Ok(_) => {
                                tracing::info!(vehicle_id = %id, "vehicle updated");
                                let _ = ui_tx.try_send(UiEvent::VehicleSaved);
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::MutationFailed(
                                    UiError::from_message(
                                        UiErrorContext::SaveVehicle,
                                        err.to_string(),
                                    ),
                                ));
                            }
                        }
                    }
                    BackendCommand::DeleteVehicle { id } => {
                        match client.delete_vehicle(&id).await {
                            Ok(()) => {
                                tracing::info!(vehicle_id = %id, "vehicle deleted");
                                let _ = ui_tx.try_send(UiEvent::VehicleDeleted);
                            }
                            // A record that is already gone counts as deleted;
                            // the refetch will drop it from the grid.
                            Err(err) if err.is_not_found() => {
                                tracing::info!(vehicle_id = %id, "vehicle was already deleted");
                                let _ = ui_tx.try_send(UiEvent::VehicleDeleted);
                            }
                            Err(err) => {
                                tracing::warn!(vehicle_id = %id, "vehicle delete failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::MutationFailed(
                                    UiError::from_message(
                                        UiErrorContext::DeleteVehicle,
                                        err.to_string(),
                                    ),
                                ));
                            }
                        }
                    }
                }
            }
        });
    });
}
