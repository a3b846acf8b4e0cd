use std::sync::Arc;

use crate::domain::entities::vehicle::{NewVehicle, Vehicle, VehicleUpdate};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::VehicleRepository;

pub struct VehicleService {
    vehicles: Arc<dyn VehicleRepository>,
}

impl VehicleService {
    pub fn new(vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { vehicles }
    }

    pub async fn create(&self, vehicle: NewVehicle) -> DomainResult<Vehicle> {
        vehicle.validate()?;
        let vehicle = self.vehicles.create(vehicle).await?;
        tracing::info!(vehicle_id = vehicle.vehicle_id, event = "vehicle_created", "Vehicle created");
        Ok(vehicle)
    }

    pub async fn get(&self, vehicle_id: i64) -> DomainResult<Vehicle> {
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle"))
    }

    pub async fn update(&self, vehicle_id: i64, update: VehicleUpdate) -> DomainResult<Vehicle> {
        if update.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }
        update.validate()?;

        let mut vehicle = self.get(vehicle_id).await?;
        update.apply_to(&mut vehicle);
        let vehicle = self.vehicles.update(&vehicle).await?;
        tracing::info!(vehicle_id, event = "vehicle_updated", "Vehicle updated");
        Ok(vehicle)
    }

    pub async fn delete(&self, vehicle_id: i64) -> DomainResult<()> {
        if !self.vehicles.delete(vehicle_id).await? {
            return Err(DomainError::not_found("Vehicle"));
        }
        tracing::info!(vehicle_id, event = "vehicle_deleted", "Vehicle deleted");
        Ok(())
    }
}
