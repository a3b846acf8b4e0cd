//! Unit tests for the listing service

use std::sync::Arc;

use crate::domain::entities::listing::{ListingFilter, ListingStatus, ListingUpdate, NewListing};
use crate::domain::entities::user::Role;
use crate::domain::value_objects::EnrichmentResult;
use crate::errors::DomainError;
use crate::repositories::{InMemoryListingRepository, InMemoryWatchlistRepository};
use crate::services::enrichment::tests::mocks::{Behaviour, MockVehicleSource};
use crate::services::enrichment::{EnrichmentClient, ListingEnrichmentComposer};
use crate::services::listing::{ListingActor, ListingService};

const SELLER: ListingActor = ListingActor {
    user_id: 1,
    role: Role::Member,
};
const STRANGER: ListingActor = ListingActor {
    user_id: 2,
    role: Role::Member,
};
const STAFF: ListingActor = ListingActor {
    user_id: 3,
    role: Role::Staff,
};

fn service_with(source: MockVehicleSource) -> (ListingService, Arc<MockVehicleSource>) {
    let source = Arc::new(source);
    let composer = Arc::new(ListingEnrichmentComposer::new(Arc::new(EnrichmentClient::new(
        source.clone(),
    ))));
    let service = ListingService::new(
        Arc::new(InMemoryListingRepository::new()),
        Arc::new(InMemoryWatchlistRepository::new()),
        composer,
    );
    (service, source)
}

fn service() -> ListingService {
    let source = MockVehicleSource::new(Behaviour::Serve)
        .with_vehicle(1, "Honda", "Civic", 2018, 40_000)
        .with_vehicle(2, "Toyota", "Camry", 2021, 12_000);
    service_with(source).0
}

fn new_listing(title: &str, price: f64, vehicle_id: Option<i64>) -> NewListing {
    NewListing {
        vehicle_id,
        title: title.to_string(),
        description: None,
        price,
        images: vec![],
    }
}

#[tokio::test]
async fn test_create_and_get_composes_vehicle() {
    let service = service();
    let created = service.create(SELLER.user_id, new_listing("Civic", 15_000.0, Some(1))).await.unwrap();
    assert_eq!(created.listing.status, ListingStatus::Available);

    let fetched = service.get(created.listing.listing_id).await.unwrap();
    assert_eq!(fetched.vehicle().unwrap().brand, "Honda");
}

#[tokio::test]
async fn test_create_rejects_invalid_price() {
    let service = service();
    let result = service.create(SELLER.user_id, new_listing("Free car", 0.0, None)).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_get_survives_vehicle_service_outage() {
    let (service, source) = service_with(MockVehicleSource::new(Behaviour::Unreachable));
    let created = service.create(SELLER.user_id, new_listing("Civic", 15_000.0, Some(1))).await.unwrap();

    let fetched = service.get(created.listing.listing_id).await.unwrap();
    assert_eq!(fetched.vehicle_details, Some(EnrichmentResult::Absent));
    assert_eq!(fetched.listing.title, "Civic");
    assert!(source.call_count() >= 1);
}

#[tokio::test]
async fn test_get_missing_listing_is_not_found() {
    assert!(matches!(service().get(404).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_filter_by_price_and_vehicle_fields() {
    let service = service();
    service.create(1, new_listing("Civic", 15_000.0, Some(1))).await.unwrap();
    service.create(1, new_listing("Camry", 25_000.0, Some(2))).await.unwrap();
    service.create(1, new_listing("Mystery", 5_000.0, None)).await.unwrap();

    let cheap = service
        .filter(&ListingFilter {
            max_price: Some(20_000.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cheap.len(), 2);

    let toyotas = service
        .filter(&ListingFilter {
            brand: Some("toyota".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(toyotas.len(), 1);
    assert_eq!(toyotas[0].listing.title, "Camry");

    let low_mileage = service
        .filter(&ListingFilter {
            max_mileage: Some(50_000),
            year: Some(2018),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(low_mileage.len(), 1);
    assert_eq!(low_mileage[0].listing.title, "Civic");
}

#[tokio::test]
async fn test_only_seller_or_staff_may_update_and_delete() {
    let service = service();
    let created = service.create(SELLER.user_id, new_listing("Civic", 15_000.0, None)).await.unwrap();
    let id = created.listing.listing_id;
    let update = ListingUpdate {
        price: Some(14_000.0),
        ..Default::default()
    };

    assert!(matches!(
        service.update(id, STRANGER, update.clone()).await,
        Err(DomainError::Forbidden { .. })
    ));
    let updated = service.update(id, SELLER, update).await.unwrap();
    assert_eq!(updated.listing.price, 14_000.0);

    assert!(matches!(service.delete(id, STRANGER).await, Err(DomainError::Forbidden { .. })));
    service.delete(id, STAFF).await.unwrap();
    assert!(matches!(service.get(id).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_sold_listing_leaves_available_list() {
    let service = service();
    let a = service.create(1, new_listing("A", 10.0, None)).await.unwrap();
    let b = service.create(1, new_listing("B", 10.0, None)).await.unwrap();

    service.set_status(a.listing.listing_id, ListingStatus::Sold).await.unwrap();

    let available = service.list_available().await.unwrap();
    let ids: Vec<i64> = available.iter().map(|c| c.listing.listing_id).collect();
    assert_eq!(ids, vec![b.listing.listing_id]);
}

#[tokio::test]
async fn test_compare_bounds_and_order() {
    let service = service();
    let mut ids = Vec::new();
    for i in 0..5 {
        let created = service
            .create(1, new_listing(&format!("L{}", i), 1_000.0, Some(1)))
            .await
            .unwrap();
        ids.push(created.listing.listing_id);
    }

    assert!(matches!(service.compare(&ids[..1]).await, Err(DomainError::Validation { .. })));
    assert!(matches!(service.compare(&ids).await, Err(DomainError::Validation { .. })));
    assert!(matches!(
        service.compare(&[ids[0], ids[0]]).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        service.compare(&[ids[0], 999]).await,
        Err(DomainError::NotFound { .. })
    ));

    let compared = service.compare(&[ids[3], ids[1], ids[2]]).await.unwrap();
    let order: Vec<i64> = compared.iter().map(|c| c.listing.listing_id).collect();
    assert_eq!(order, vec![ids[3], ids[1], ids[2]]);
    assert!(compared.iter().all(|c| c.vehicle().is_some()));
}

#[tokio::test]
async fn test_watchlist_lifecycle() {
    let service = service();
    let a = service.create(1, new_listing("A", 10.0, None)).await.unwrap().listing.listing_id;
    let b = service.create(1, new_listing("B", 10.0, Some(2))).await.unwrap().listing.listing_id;

    service.watch(7, a).await.unwrap();
    service.watch(7, b).await.unwrap();
    assert!(matches!(service.watch(7, a).await, Err(DomainError::Conflict { .. })));
    assert!(matches!(service.watch(7, 999).await, Err(DomainError::NotFound { .. })));

    let watched = service.watchlist(7).await.unwrap();
    let ids: Vec<i64> = watched.iter().map(|c| c.listing.listing_id).collect();
    assert_eq!(ids, vec![b, a]);
    assert_eq!(watched[0].vehicle().unwrap().brand, "Toyota");

    service.unwatch(7, a).await.unwrap();
    assert!(matches!(service.unwatch(7, a).await, Err(DomainError::NotFound { .. })));

    service.delete(b, SELLER).await.unwrap();
    assert!(service.watchlist(7).await.unwrap().is_empty());
}
