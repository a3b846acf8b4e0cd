//! Vehicle records owned by the vehicle service.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
}

impl NewVehicle {
    pub fn validate(&self) -> DomainResult<()> {
        validate_text("brand", &self.brand)?;
        validate_text("model", &self.model)?;
        validate_year(self.year)?;
        validate_mileage(self.mileage)
    }

    pub(crate) fn into_vehicle(self, vehicle_id: i64) -> Vehicle {
        Vehicle {
            vehicle_id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            mileage: self.mileage,
        }
    }
}

/// Partial update; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub mileage: Option<i64>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.year.is_none() && self.mileage.is_none()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(brand) = &self.brand {
            validate_text("brand", brand)?;
        }
        if let Some(model) = &self.model {
            validate_text("model", model)?;
        }
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(mileage) = self.mileage {
            validate_mileage(mileage)?;
        }
        Ok(())
    }

    pub fn apply_to(self, vehicle: &mut Vehicle) {
        if let Some(brand) = self.brand {
            vehicle.brand = brand;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
        if let Some(mileage) = self.mileage {
            vehicle.mileage = mileage;
        }
    }
}

fn validate_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

fn validate_year(year: i32) -> DomainResult<()> {
    let current_year = Utc::now().year();
    if year < 1886 || year > current_year {
        return Err(DomainError::Validation {
            message: format!("year must be between 1886 and {}", current_year),
        });
    }
    Ok(())
}

fn validate_mileage(mileage: i64) -> DomainResult<()> {
    if mileage < 0 {
        return Err(DomainError::Validation {
            message: "mileage must not be negative".to_string(),
        });
    }
    Ok(())
}
