use chrono::{Datelike, Utc};

use crate::domain::entities::vehicle::{NewVehicle, VehicleUpdate};

fn vehicle(year: i32, mileage: i64) -> NewVehicle {
    NewVehicle {
        brand: "Toyota".into(),
        model: "Corolla".into(),
        year,
        mileage,
    }
}

#[test]
fn test_current_year_is_accepted() {
    assert!(vehicle(Utc::now().year(), 0).validate().is_ok());
}

#[test]
fn test_future_year_is_rejected() {
    assert!(vehicle(Utc::now().year() + 1, 0).validate().is_err());
}

#[test]
fn test_negative_mileage_is_rejected() {
    assert!(vehicle(2015, -1).validate().is_err());
}

#[test]
fn test_blank_brand_is_rejected() {
    let mut new_vehicle = vehicle(2015, 10);
    new_vehicle.brand = "  ".into();
    assert!(new_vehicle.validate().is_err());
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let mut existing = vehicle(2015, 10).into_vehicle(3);
    let update = VehicleUpdate {
        mileage: Some(20_000),
        ..Default::default()
    };
    assert!(update.validate().is_ok());
    update.apply_to(&mut existing);
    assert_eq!(existing.mileage, 20_000);
    assert_eq!(existing.brand, "Toyota");
    assert_eq!(existing.year, 2015);
}
