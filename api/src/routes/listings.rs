//! Listing endpoints.
//!
//! Reads are public and return listings composed with their vehicle
//! details. Writes require a token; updates and deletes are limited to the
//! seller or moderators, status changes to moderators.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;

use am_core::domain::entities::listing::{ListingFilter, ListingStatus};
use am_core::services::{ListingActor, RoleRequirement};
use am_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::listings::{
    parse_compare_ids, CreateListingRequest, FilterQuery, StatusRequest, UpdateListingRequest,
};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    // `/listings/filter` must be registered ahead of `/listings/{id}`
    cfg.service(
        web::resource("/listings")
            .route(web::get().to(list_listings))
            .route(web::post().to(create_listing).wrap(JwtAuth)),
    )
    .route("/listings/filter", web::get().to(filter_listings))
    .service(
        web::resource("/listings/{id}")
            .route(web::get().to(get_listing))
            .route(web::put().to(update_listing).wrap(JwtAuth))
            .route(web::delete().to(delete_listing).wrap(JwtAuth)),
    )
    .route("/listings/{id}/status", web::put().to(set_status).wrap(JwtAuth))
    .route("/compare", web::get().to(compare_listings));
}

fn actor(auth: &AuthContext) -> ListingActor {
    ListingActor {
        user_id: auth.user_id,
        role: auth.role,
    }
}

pub async fn list_listings(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let listings = state.listings.list_available().await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// GET /api/listings/filter
///
/// Title and price bounds narrow the available listings; brand, model,
/// year and mileage are matched against the enriched vehicle details.
pub async fn filter_listings(
    state: web::Data<AppState>,
    query: web::Query<FilterQuery>,
) -> ApiResult<HttpResponse> {
    let filter: ListingFilter = query.into_inner().into();
    let listings = state.listings.filter(&filter).await?;
    Ok(HttpResponse::Ok().json(listings))
}

pub async fn get_listing(state: web::Data<AppState>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let listing = state.listings.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Listing found",
        "listing": listing,
    })))
}

pub async fn create_listing(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<CreateListingRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let listing = state.listings.create(auth.user_id, request.into()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Listing created successfully",
        "listing": listing,
    })))
}

pub async fn update_listing(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<UpdateListingRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let listing = state
        .listings
        .update(path.into_inner(), actor(&auth), request.into())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Listing updated successfully",
        "listing": listing,
    })))
}

pub async fn delete_listing(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.listings.delete(path.into_inner(), actor(&auth)).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Listing deleted successfully")))
}

/// PUT /api/listings/{id}/status (Admin or Staff)
pub async fn set_status(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<StatusRequest>,
) -> ApiResult<HttpResponse> {
    auth.require(RoleRequirement::AdminOrStaff)?;
    let request = request.into_inner();
    request.validate()?;

    let status: ListingStatus = request.status.parse().map_err(ApiError::bad_request)?;
    let listing = state.listings.set_status(path.into_inner(), status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Listing marked as {}", status.as_str()),
        "listing": listing,
    })))
}

/// GET /api/compare?id=1&id=2
///
/// Takes two to four distinct listing ids and returns them in request order.
pub async fn compare_listings(req: HttpRequest, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let ids = parse_compare_ids(req.query_string()).map_err(ApiError::bad_request)?;
    let listings = state.listings.compare(&ids).await?;
    Ok(HttpResponse::Ok().json(listings))
}
