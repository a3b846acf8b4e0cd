//! JWT authentication middleware for protected endpoints.
//!
//! The middleware reads the `Authorization: Bearer <token>` header, verifies
//! the token with the application's `TokenService` and stores an
//! `AuthContext` in the request extensions. Handlers take `AuthContext` as an
//! extractor and check their role gate with [`AuthContext::require`].

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use am_core::domain::entities::token::Claims;
use am_core::domain::entities::user::Role;
use am_core::errors::{AuthError, DomainError, TokenError};
use am_core::services::{authorize, RoleRequirement};

use crate::app::AppState;
use crate::handlers::ApiError;

/// Caller identity injected into authenticated requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: Role,
    pub claims: Claims,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            role: claims.role,
            claims,
        })
    }

    /// Fail with 403 unless the caller satisfies `requirement`
    pub fn require(&self, requirement: RoleRequirement) -> Result<(), ApiError> {
        if authorize(&self.claims, requirement) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = self.user_id,
                role = self.role.as_str(),
                ?requirement,
                "Role gate rejected caller"
            );
            Err(DomainError::Auth(AuthError::InsufficientPermissions).into())
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let auth_context = authenticate(&req)?;
            req.extensions_mut().insert(auth_context);
            service.call(req).await
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req)
        .ok_or(DomainError::Auth(AuthError::AuthenticationRequired))?;

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("Application state missing; cannot verify tokens");
        DomainError::Internal {
            message: "token verification not configured".to_string(),
        }
    })?;

    let claims = state.tokens.verify_access_token(&token).map_err(|e| {
        tracing::debug!(error = %e, path = req.path(), "Rejected bearer token");
        e
    })?;

    Ok(AuthContext::from_claims(claims)?)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, ApiError> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| DomainError::Auth(AuthError::AuthenticationRequired).into());

        ready(result)
    }
}
