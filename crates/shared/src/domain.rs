use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque backend identifier for a vehicle record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vehicle record as stored by the backend. The client never mutates these
/// in place; edits go through `protocol::VehicleDraft`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub style: String,
    pub size: String,
    pub transmission_type: String,
    pub price: i64,
    pub release_date: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_maps_backend_underscore_id_field() {
        let json = r#"{
            "_id": "64f1c0ffee",
            "make": "Toyota",
            "model": "Corolla",
            "style": "Sedan",
            "size": "Compact",
            "transmission_type": "AUTOMATIC",
            "price": 20000,
            "release_date": 2020
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).expect("vehicle json");
        assert_eq!(vehicle.id, VehicleId("64f1c0ffee".to_string()));
        assert_eq!(vehicle.make, "Toyota");
        assert_eq!(vehicle.release_date, 2020);

        let back = serde_json::to_value(&vehicle).expect("serialize");
        assert_eq!(back["_id"], "64f1c0ffee");
    }
}
