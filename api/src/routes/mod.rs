//! Route handlers grouped by resource
//!
//! Every module exposes a `configure` function that registers its resources
//! under the `/api` scope. Protected routes are wrapped individually with
//! `JwtAuth`; role and ownership checks happen inside the handlers.

pub mod listings;
pub mod reviews;
pub mod users;
pub mod vehicles;
pub mod watchlist;

use actix_web::web;

/// Register every `/api` resource
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(users::configure)
        .configure(vehicles::configure)
        .configure(listings::configure)
        .configure(watchlist::configure)
        .configure(reviews::configure);
}
