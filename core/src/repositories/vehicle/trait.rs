//! Vehicle repository trait.

use async_trait::async_trait;

use crate::domain::entities::vehicle::{NewVehicle, Vehicle};
use crate::errors::DomainError;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, DomainError>;

    async fn find_by_id(&self, vehicle_id: i64) -> Result<Option<Vehicle>, DomainError>;

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, DomainError>;

    /// Returns `true` when a vehicle was removed
    async fn delete(&self, vehicle_id: i64) -> Result<bool, DomainError>;
}
