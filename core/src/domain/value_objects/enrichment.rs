//! Listing enrichment values.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Listing, Vehicle};

/// Vehicle fields attached to a listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
}

impl From<Vehicle> for VehicleSnapshot {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            vehicle_id: Some(vehicle.vehicle_id),
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            mileage: vehicle.mileage,
        }
    }
}

/// Outcome of a vehicle lookup. `Absent` serializes as `null` and is an
/// ordinary value, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum EnrichmentResult {
    Found(VehicleSnapshot),
    #[default]
    Absent,
}

impl EnrichmentResult {
    pub fn is_found(&self) -> bool {
        matches!(self, EnrichmentResult::Found(_))
    }

    pub fn vehicle(&self) -> Option<&VehicleSnapshot> {
        match self {
            EnrichmentResult::Found(vehicle) => Some(vehicle),
            EnrichmentResult::Absent => None,
        }
    }
}

impl From<Option<VehicleSnapshot>> for EnrichmentResult {
    fn from(value: Option<VehicleSnapshot>) -> Self {
        value.map_or(EnrichmentResult::Absent, EnrichmentResult::Found)
    }
}

/// A listing plus its vehicle details.
///
/// `vehicle_details` is omitted from the payload when the listing carries no
/// vehicle id, and is `null` when the lookup was attempted but failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedListing {
    #[serde(flatten)]
    pub listing: Listing,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_details: Option<EnrichmentResult>,
}

impl ComposedListing {
    pub fn vehicle(&self) -> Option<&VehicleSnapshot> {
        self.vehicle_details.as_ref().and_then(EnrichmentResult::vehicle)
    }
}
