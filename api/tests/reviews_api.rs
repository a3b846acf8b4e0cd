mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use am_core::domain::entities::user::Role;
use common::Harness;

#[actix_rt::test]
async fn test_review_ownership_and_listing() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;
    let (author, author_token) = harness.account("rita", Role::Member).await;
    let (_, other_token) = harness.account("otto", Role::Member).await;
    let (_, admin_token) = harness.account("root", Role::Admin).await;

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .insert_header(("Authorization", author_token.as_str()))
        .set_json(json!({"transaction_id": 10, "rating": 4, "comment": "Smooth sale"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["review"]["reviewer_id"], author.user_id);
    let uri = format!("/api/reviews/{}", body["review"]["review_id"]);

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .insert_header(("Authorization", author_token.as_str()))
        .set_json(json!({"transaction_id": 10, "rating": 2}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .insert_header(("Authorization", other_token.as_str()))
        .set_json(json!({"transaction_id": 10, "rating": 6}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .insert_header(("Authorization", other_token.as_str()))
        .set_json(json!({"transaction_id": 10, "rating": 0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/reviews/transaction/10").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    for token in [&other_token, &admin_token] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", token.as_str()))
            .set_json(json!({"rating": 1}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("Authorization", author_token.as_str()))
        .set_json(json!({"rating": 5, "comment": "Even better on reflection"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["review"]["rating"], 5);

    let req = test::TestRequest::get()
        .uri("/api/reviews/mine")
        .insert_header(("Authorization", author_token.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["comment"], "Even better on reflection");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", other_token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", author_token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", author_token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_my_reviews_requires_token() {
    let harness = Harness::new();
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::get().uri("/api/reviews/mine").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/reviews/transaction/77").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());
}
