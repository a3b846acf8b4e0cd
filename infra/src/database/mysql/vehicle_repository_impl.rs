//! MySQL implementation of the VehicleRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use am_core::domain::entities::vehicle::{NewVehicle, Vehicle};
use am_core::errors::DomainError;
use am_core::repositories::VehicleRepository;

use super::{column, db_error};

pub struct MySqlVehicleRepository {
    pool: MySqlPool,
}

impl MySqlVehicleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_vehicle(row: &MySqlRow) -> Result<Vehicle, DomainError> {
        Ok(Vehicle {
            vehicle_id: column(row, "vehicle_id")?,
            brand: column(row, "brand")?,
            model: column(row, "model")?,
            year: column(row, "year")?,
            mileage: column(row, "mileage")?,
        })
    }
}

#[async_trait]
impl VehicleRepository for MySqlVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, DomainError> {
        let result = sqlx::query("INSERT INTO vehicles (brand, model, year, mileage) VALUES (?, ?, ?, ?)")
            .bind(&vehicle.brand)
            .bind(&vehicle.model)
            .bind(vehicle.year)
            .bind(vehicle.mileage)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to create vehicle"))?;

        Ok(Vehicle {
            vehicle_id: result.last_insert_id() as i64,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            mileage: vehicle.mileage,
        })
    }

    async fn find_by_id(&self, vehicle_id: i64) -> Result<Option<Vehicle>, DomainError> {
        let row = sqlx::query("SELECT vehicle_id, brand, model, year, mileage FROM vehicles WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_vehicle).transpose()
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, DomainError> {
        let result = sqlx::query("UPDATE vehicles SET brand = ?, model = ?, year = ?, mileage = ? WHERE vehicle_id = ?")
            .bind(&vehicle.brand)
            .bind(&vehicle.model)
            .bind(vehicle.year)
            .bind(vehicle.mileage)
            .bind(vehicle.vehicle_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update vehicle"))?;

        if result.rows_affected() == 0 && self.find_by_id(vehicle.vehicle_id).await?.is_none() {
            return Err(DomainError::not_found("Vehicle"));
        }
        Ok(vehicle.clone())
    }

    async fn delete(&self, vehicle_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete vehicle"))?;
        Ok(result.rows_affected() > 0)
    }
}
