//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::Effect;

pub fn command_for_effect(effect: Effect) -> BackendCommand {
    match effect {
        Effect::Fetch(intent) => BackendCommand::FetchPage {
            page: intent.page,
            search: intent.search,
            generation: intent.generation,
        },
        Effect::Delete(id) => BackendCommand::DeleteVehicle { id },
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::FetchPage { .. } => "fetch_page",
        BackendCommand::CreateVehicle { .. } => "create_vehicle",
        BackendCommand::UpdateVehicle { .. } => "update_vehicle",
        BackendCommand::DeleteVehicle { .. } => "delete_vehicle",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); relaunch"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::reducer::FetchIntent;
    use crossbeam_channel::bounded;
    use shared::domain::VehicleId;

    #[test]
    fn fetch_effect_maps_onto_fetch_command() {
        let cmd = command_for_effect(Effect::Fetch(FetchIntent {
            page: 3,
            search: "civic".to_string(),
            generation: 7,
        }));
        match cmd {
            BackendCommand::FetchPage {
                page,
                search,
                generation,
            } => {
                assert_eq!(page, 3);
                assert_eq!(search, "civic");
                assert_eq!(generation, 7);
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn full_queue_sets_retry_status() {
        let (tx, _rx) = bounded(0);
        let mut status = String::new();
        dispatch_backend_command(
            &tx,
            command_for_effect(Effect::Delete(VehicleId("v1".to_string()))),
            &mut status,
        );
        assert!(status.contains("retry"));
    }

    #[test]
    fn disconnected_queue_sets_relaunch_status() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(
            &tx,
            command_for_effect(Effect::Delete(VehicleId("v1".to_string()))),
            &mut status,
        );
        assert!(status.contains("disconnected"));
    }
}
