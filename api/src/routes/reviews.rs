//! Transaction reviews. Only the author may edit or delete a review.

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use am_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::reviews::{CreateReviewRequest, UpdateReviewRequest};
use crate::handlers::ApiResult;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    // `/reviews/mine` must be registered ahead of `/reviews/{id}`
    cfg.route("/reviews", web::post().to(create_review).wrap(JwtAuth))
        .route("/reviews/mine", web::get().to(my_reviews).wrap(JwtAuth))
        .route("/reviews/transaction/{id}", web::get().to(transaction_reviews))
        .service(
            web::resource("/reviews/{id}")
                .route(web::put().to(update_review).wrap(JwtAuth))
                .route(web::delete().to(delete_review).wrap(JwtAuth)),
        );
}

pub async fn create_review(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let review = state.reviews.create(auth.user_id, request.into()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Review submitted successfully",
        "review": review,
    })))
}

pub async fn update_review(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<UpdateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let review = state
        .reviews
        .update(path.into_inner(), auth.user_id, request.into())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Review updated successfully",
        "review": review,
    })))
}

pub async fn delete_review(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.reviews.delete(path.into_inner(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Review deleted successfully")))
}

pub async fn transaction_reviews(state: web::Data<AppState>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let reviews = state.reviews.list_for_transaction(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

pub async fn my_reviews(auth: AuthContext, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let reviews = state.reviews.list_by_reviewer(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}
