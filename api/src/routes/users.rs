//! Account endpoints: registration, login, password reset and
//! administration of user accounts.

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use am_core::domain::entities::user::AccountStatus;
use am_core::services::RoleRequirement;
use am_shared::masking::mask_email;
use am_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::users::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, SendOtpRequest, UpdateAccountRequest,
};
use crate::handlers::ApiResult;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/send_otp", web::post().to(send_otp))
        .route("/reset-password", web::post().to(reset_password))
        .service(
            web::resource("/account")
                .route(web::put().to(update_account).wrap(JwtAuth))
                .route(web::delete().to(delete_account).wrap(JwtAuth)),
        )
        .route("/users", web::get().to(list_users).wrap(JwtAuth))
        .route("/users/{id}/lock", web::put().to(toggle_lock).wrap(JwtAuth));
}

/// POST /api/register
///
/// Creates a member account and returns it with status 201.
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let user = state
        .users
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "user": user,
    })))
}

/// POST /api/login
///
/// `email_username` matches either the username or the email address.
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let result = state.users.login(&request.email_username, &request.password).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// POST /api/send_otp
pub async fn send_otp(state: web::Data<AppState>, request: web::Json<SendOtpRequest>) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    tracing::debug!(email = %mask_email(&request.email), "Password reset code requested");
    let issued = state.users.send_reset_otp(&request.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "OTP sent to your email",
        "expires_in": issued.expires_in_seconds,
    })))
}

/// POST /api/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    state
        .users
        .reset_password(&request.email, &request.otp, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")))
}

/// PUT /api/account
pub async fn update_account(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<UpdateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let user = state.users.update_account(auth.user_id, request.into()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Account updated successfully",
        "user": user,
    })))
}

/// DELETE /api/account
pub async fn delete_account(auth: AuthContext, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    state.users.delete_account(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Account deleted successfully")))
}

/// GET /api/users (Admin or Staff)
pub async fn list_users(auth: AuthContext, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    auth.require(RoleRequirement::AdminOrStaff)?;

    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// PUT /api/users/{id}/lock (Admin)
///
/// Flips the account between active and locked.
pub async fn toggle_lock(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    auth.require(RoleRequirement::Admin)?;

    let user = state.users.toggle_lock(path.into_inner()).await?;
    let message = match user.status {
        AccountStatus::Locked => "User account locked",
        AccountStatus::Active => "User account unlocked",
    };

    Ok(HttpResponse::Ok().json(json!({
        "message": message,
        "user": user,
    })))
}
