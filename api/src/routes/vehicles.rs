//! Vehicle records.
//!
//! `GET /api/vehicle/{id}` is also the lookup the listing enrichment client
//! performs against the vehicle service, so its body shape is fixed.

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use am_core::services::RoleRequirement;
use am_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::vehicles::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::handlers::ApiResult;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-vehicle", web::post().to(create_vehicle).wrap(JwtAuth))
        .service(
            web::resource("/vehicle/{id}")
                .route(web::get().to(get_vehicle))
                .route(web::put().to(update_vehicle).wrap(JwtAuth))
                .route(web::delete().to(delete_vehicle).wrap(JwtAuth)),
        );
}

pub async fn create_vehicle(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<CreateVehicleRequest>,
) -> ApiResult<HttpResponse> {
    auth.require(RoleRequirement::Admin)?;
    let request = request.into_inner();
    request.validate()?;

    let vehicle = state.vehicles.create(request.into()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Vehicle created successfully",
        "vehicle": vehicle,
    })))
}

pub async fn get_vehicle(state: web::Data<AppState>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let vehicle = state.vehicles.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Vehicle found",
        "vehicle": vehicle,
    })))
}

pub async fn update_vehicle(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<UpdateVehicleRequest>,
) -> ApiResult<HttpResponse> {
    auth.require(RoleRequirement::AdminOrStaff)?;
    let request = request.into_inner();
    request.validate()?;

    let vehicle = state.vehicles.update(path.into_inner(), request.into()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Vehicle updated successfully",
        "vehicle": vehicle,
    })))
}

pub async fn delete_vehicle(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    auth.require(RoleRequirement::Admin)?;

    state.vehicles.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Vehicle deleted successfully")))
}
