use async_trait::async_trait;

use crate::domain::value_objects::VehicleSnapshot;
use crate::errors::EnrichmentError;

/// Downstream lookup of a vehicle by id (the vehicle service)
#[async_trait]
pub trait VehicleSource: Send + Sync {
    async fn fetch_vehicle(&self, vehicle_id: i64) -> Result<VehicleSnapshot, EnrichmentError>;
}
