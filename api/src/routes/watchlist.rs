use actix_web::{web, HttpResponse};
use serde_json::json;

use am_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::watchlist::WatchRequest;
use crate::handlers::ApiResult;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/watch-list")
            .route(web::post().to(add_to_watchlist).wrap(JwtAuth))
            .route(web::get().to(get_watchlist).wrap(JwtAuth)),
    )
    .route(
        "/watch-list/{listing_id}",
        web::delete().to(remove_from_watchlist).wrap(JwtAuth),
    );
}

pub async fn add_to_watchlist(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<WatchRequest>,
) -> ApiResult<HttpResponse> {
    let entry = state.listings.watch(auth.user_id, request.listing_id).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Listing added to watchlist",
        "entry": entry,
    })))
}

/// Watched listings, most recently added first
pub async fn get_watchlist(auth: AuthContext, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let listings = state.listings.watchlist(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(listings))
}

pub async fn remove_from_watchlist(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.listings.unwatch(auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Listing removed from watchlist")))
}
