//! Backend commands queued from UI to backend worker.

use shared::{domain::VehicleId, protocol::VehicleDraft};

pub enum BackendCommand {
    FetchPage {
        page: u32,
        search: String,
        generation: u64,
    },
    CreateVehicle {
        draft: VehicleDraft,
    },
    UpdateVehicle {
        id: VehicleId,
        draft: VehicleDraft,
    },
    DeleteVehicle {
        id: VehicleId,
    },
}
