use serde::{Deserialize, Serialize};
use validator::Validate;

use am_core::domain::entities::vehicle::{NewVehicle, VehicleUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub year: i32,

    #[validate(range(min = 0))]
    pub mileage: i64,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        NewVehicle {
            brand: request.brand,
            model: request.model,
            year: request.year,
            mileage: request.mileage,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub year: Option<i32>,

    #[validate(range(min = 0))]
    pub mileage: Option<i64>,
}

impl From<UpdateVehicleRequest> for VehicleUpdate {
    fn from(request: UpdateVehicleRequest) -> Self {
        VehicleUpdate {
            brand: request.brand,
            model: request.model,
            year: request.year,
            mileage: request.mileage,
        }
    }
}
