use crate::domain::entities::listing::{ListingFilter, ListingStatus, ListingUpdate, NewListing};
use crate::domain::value_objects::VehicleSnapshot;

fn new_listing(price: f64) -> NewListing {
    NewListing {
        vehicle_id: Some(1),
        title: "Clean Civic".into(),
        description: None,
        price,
        images: vec![],
    }
}

fn snapshot() -> VehicleSnapshot {
    VehicleSnapshot {
        vehicle_id: Some(1),
        brand: "Honda".into(),
        model: "Civic Type R".into(),
        year: 2019,
        mileage: 42_000,
    }
}

#[test]
fn test_price_bounds() {
    assert!(new_listing(1.0).validate().is_ok());
    assert!(new_listing(99_999_999.99).validate().is_ok());
    assert!(new_listing(0.0).validate().is_err());
    assert!(new_listing(-5.0).validate().is_err());
    assert!(new_listing(100_000_000.0).validate().is_err());
    assert!(new_listing(f64::NAN).validate().is_err());
}

#[test]
fn test_new_listing_starts_available() {
    let listing = new_listing(10.0).into_listing(1, 2);
    assert_eq!(listing.status, ListingStatus::Available);
    assert_eq!(listing.seller_id, 2);
}

#[test]
fn test_update_rejects_bad_price() {
    let update = ListingUpdate {
        price: Some(0.0),
        ..Default::default()
    };
    assert!(update.validate().is_err());
}

#[test]
fn test_filter_title_and_price() {
    let listing = new_listing(15_000.0).into_listing(1, 2);
    let filter = ListingFilter {
        title: Some("civic".into()),
        min_price: Some(10_000.0),
        max_price: Some(15_000.0),
        ..Default::default()
    };
    assert!(filter.matches_listing(&listing));

    let too_cheap = ListingFilter {
        max_price: Some(14_999.0),
        ..Default::default()
    };
    assert!(!too_cheap.matches_listing(&listing));
}

#[test]
fn test_filter_vehicle_criteria() {
    let filter = ListingFilter {
        brand: Some("honda".into()),
        model: Some("type r".into()),
        year: Some(2019),
        max_mileage: Some(50_000),
        ..Default::default()
    };
    assert!(filter.has_vehicle_criteria());
    assert!(filter.matches_vehicle(&snapshot()));

    let newer = ListingFilter {
        year: Some(2020),
        ..Default::default()
    };
    assert!(!newer.matches_vehicle(&snapshot()));
}

#[test]
fn test_filter_rejects_inverted_ranges() {
    let filter = ListingFilter {
        min_price: Some(10.0),
        max_price: Some(5.0),
        ..Default::default()
    };
    assert!(filter.validate().is_err());
}

#[test]
fn test_status_serializes_lowercase() {
    assert_eq!(serde_json::to_value(ListingStatus::Sold).unwrap(), "sold");
    assert_eq!("Rejected".parse::<ListingStatus>().unwrap(), ListingStatus::Rejected);
}
