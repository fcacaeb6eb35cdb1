use serde::{Deserialize, Serialize};

use crate::domain::Vehicle;

/// Listing response for `GET /vehicles?page={page}&search={query}`.
///
/// `total` is a page count, not a record count; the backend sizes pages at a
/// fixed five records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePage {
    pub data: Vec<Vehicle>,
    pub total: u32,
}

/// Identifier-less vehicle payload for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub make: String,
    pub model: String,
    pub style: String,
    pub size: String,
    pub transmission_type: String,
    pub price: i64,
    pub release_date: i32,
}

impl VehicleDraft {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            style: vehicle.style.clone(),
            size: vehicle.size.clone(),
            transmission_type: vehicle.transmission_type.clone(),
            price: vehicle.price,
            release_date: vehicle.release_date,
        }
    }
}
