mod common;

use std::time::Duration;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use am_core::domain::entities::user::Role;
use common::{Harness, StubVehicles};

fn harness() -> Harness {
    Harness::with_vehicles(
        StubVehicles::default()
            .with(1, "Toyota", "Corolla", 2018, 60_000)
            .with(2, "Honda", "Civic", 2020, 30_000),
    )
}

#[actix_rt::test]
async fn test_vehicle_crud_gates() {
    let harness = harness();
    let app = test::init_service(harness.app()).await;
    let (_, member) = harness.account("mike", Role::Member).await;
    let (_, staff) = harness.account("sue", Role::Staff).await;
    let (_, admin) = harness.account("root", Role::Admin).await;
    let vehicle = json!({"brand": "Mazda", "model": "3", "year": 2019, "mileage": 42_000});

    let req = test::TestRequest::post()
        .uri("/api/create-vehicle")
        .insert_header(("Authorization", member.as_str()))
        .set_json(&vehicle)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/create-vehicle")
        .insert_header(("Authorization", admin.as_str()))
        .set_json(&vehicle)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["vehicle"]["vehicle_id"].as_i64().unwrap();
    let uri = format!("/api/vehicle/{}", id);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["vehicle"]["brand"], "Mazda");
    assert!(body["message"].is_string());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", staff.as_str()))
        .set_json(json!({"mileage": 45_000}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["vehicle"]["mileage"], 45_000);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", staff.as_str()))
        .set_json(json!({"year": 2999}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", staff.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", admin.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

/// POST a listing and return the created listing body
macro_rules! create_listing {
    ($app:expr, $token:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/listings")
            .insert_header(("Authorization", $token.as_str()))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["listing"].clone()
    }};
}

#[actix_rt::test]
async fn test_listing_lifecycle_and_ownership() {
    let harness = harness();
    let app = test::init_service(harness.app()).await;
    let (seller, seller_token) = harness.account("sam", Role::Member).await;
    let (_, other_token) = harness.account("olga", Role::Member).await;
    let (_, staff_token) = harness.account("sue", Role::Staff).await;

    let listing = create_listing!(
        app,
        seller_token,
        json!({"vehicle_id": 1, "title": "Reliable Corolla", "price": 12_500.0, "images": ["a.jpg"]})
    );
    assert_eq!(listing["seller_id"], seller.user_id);
    assert_eq!(listing["status"], "available");
    assert_eq!(listing["vehicle_details"]["brand"], "Toyota");
    let uri = format!("/api/listings/{}", listing["listing_id"]);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["listing"]["title"], "Reliable Corolla");
    assert_eq!(body["listing"]["images"], json!(["a.jpg"]));

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", other_token.as_str()))
        .set_json(json!({"price": 1.0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", seller_token.as_str()))
        .set_json(json!({"price": 0.0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", seller_token.as_str()))
        .set_json(json!({"price": 11_000.0}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["listing"]["price"], 11_000.0);

    let status_uri = format!("{}/status", uri);
    let req = test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(("Authorization", seller_token.as_str()))
        .set_json(json!({"status": "sold"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(("Authorization", staff_token.as_str()))
        .set_json(json!({"status": "archived"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(("Authorization", staff_token.as_str()))
        .set_json(json!({"status": "sold"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["listing"]["status"], "sold");

    let req = test::TestRequest::get().uri("/api/listings").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", other_token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", staff_token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_creating_listing_requires_token() {
    let harness = harness();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/listings")
        .set_json(json!({"title": "Anything", "price": 10.0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_filter_uses_enriched_vehicle_details() {
    let harness = harness();
    let app = test::init_service(harness.app()).await;
    let (_, token) = harness.account("sam", Role::Member).await;

    create_listing!(app, token, json!({"vehicle_id": 1, "title": "Family Corolla", "price": 9_000.0}));
    create_listing!(app, token, json!({"vehicle_id": 2, "title": "Sporty Civic", "price": 15_000.0}));
    create_listing!(app, token, json!({"vehicle_id": 99, "title": "Mystery car", "price": 5_000.0}));
    create_listing!(app, token, json!({"title": "Bare listing", "price": 7_000.0}));

    let req = test::TestRequest::get().uri("/api/listings").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0]["title"], "Bare listing");
    assert!(all[0].get("vehicle_details").is_none());
    assert!(all[1]["vehicle_details"].is_null());

    let req = test::TestRequest::get()
        .uri("/api/listings/filter?brand=honda")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Sporty Civic"]);

    let req = test::TestRequest::get()
        .uri("/api/listings/filter?mileage_max=70000&min_price=8000")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/listings/filter?title=CAR")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Mystery car"]);

    let req = test::TestRequest::get()
        .uri("/api/listings/filter?min_price=abc")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_compare_listings() {
    let harness = harness();
    let app = test::init_service(harness.app()).await;
    let (_, token) = harness.account("sam", Role::Member).await;

    let first = create_listing!(app, token, json!({"vehicle_id": 1, "title": "One", "price": 1_000.0}));
    let second = create_listing!(app, token, json!({"vehicle_id": 2, "title": "Two", "price": 2_000.0}));
    let (a, b) = (first["listing_id"].as_i64().unwrap(), second["listing_id"].as_i64().unwrap());

    let req = test::TestRequest::get()
        .uri(&format!("/api/compare?id={}&id={}", b, a))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Two", "One"]);

    for uri in [
        format!("/api/compare?id={}", a),
        format!("/api/compare?id={}&id={}", a, a),
        format!("/api/compare?id={}&id=x", a),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/compare?id={}&id=424242", a))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_watchlist() {
    let harness = harness();
    let app = test::init_service(harness.app()).await;
    let (_, seller) = harness.account("sam", Role::Member).await;
    let (_, buyer) = harness.account("bea", Role::Member).await;

    let first = create_listing!(app, seller, json!({"vehicle_id": 1, "title": "One", "price": 1_000.0}));
    let second = create_listing!(app, seller, json!({"title": "Two", "price": 2_000.0}));

    for listing in [&first, &second] {
        let req = test::TestRequest::post()
            .uri("/api/watch-list")
            .insert_header(("Authorization", buyer.as_str()))
            .set_json(json!({"listing_id": listing["listing_id"]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::post()
        .uri("/api/watch-list")
        .insert_header(("Authorization", buyer.as_str()))
        .set_json(json!({"listing_id": first["listing_id"]}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/watch-list")
        .insert_header(("Authorization", buyer.as_str()))
        .set_json(json!({"listing_id": 424242}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/watch-list")
        .insert_header(("Authorization", buyer.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Two", "One"]);
    assert_eq!(body[1]["vehicle_details"]["model"], "Corolla");

    let uri = format!("/api/watch-list/{}", first["listing_id"]);
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", buyer.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", buyer.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/watch-list")
        .insert_header(("Authorization", seller.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_enrichment_uses_configured_timeout() {
    let vehicles = || {
        StubVehicles::default()
            .with(1, "Toyota", "Corolla", 2018, 60_000)
            .slow(Duration::from_millis(1500))
    };

    let patient = Harness::with_config(vehicles(), |config| config.enrichment.timeout_ms = 3000);
    let app = test::init_service(patient.app()).await;
    let (_, token) = patient.account("sam", Role::Member).await;
    let listing = create_listing!(app, token, json!({"vehicle_id": 1, "title": "Corolla", "price": 9_000.0}));
    assert_eq!(listing["vehicle_details"]["brand"], "Toyota");

    let hasty = Harness::with_config(vehicles(), |config| config.enrichment.timeout_ms = 200);
    let app = test::init_service(hasty.app()).await;
    let (_, token) = hasty.account("sam", Role::Member).await;
    let listing = create_listing!(app, token, json!({"vehicle_id": 1, "title": "Corolla", "price": 9_000.0}));
    assert!(listing["vehicle_details"].is_null());
    assert_eq!(listing["title"], "Corolla");
}
