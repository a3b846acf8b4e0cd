use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::vehicle::{NewVehicle, Vehicle};
use crate::errors::DomainError;

use super::trait_::VehicleRepository;

pub struct InMemoryVehicleRepository {
    vehicles: RwLock<HashMap<i64, Vehicle>>,
    next_id: AtomicI64,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, DomainError> {
        let vehicle_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let vehicle = vehicle.into_vehicle(vehicle_id);
        self.vehicles.write().await.insert(vehicle_id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, vehicle_id: i64) -> Result<Option<Vehicle>, DomainError> {
        Ok(self.vehicles.read().await.get(&vehicle_id).cloned())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, DomainError> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.get_mut(&vehicle.vehicle_id) {
            Some(stored) => {
                *stored = vehicle.clone();
                Ok(vehicle.clone())
            }
            None => Err(DomainError::not_found("Vehicle")),
        }
    }

    async fn delete(&self, vehicle_id: i64) -> Result<bool, DomainError> {
        Ok(self.vehicles.write().await.remove(&vehicle_id).is_some())
    }
}
