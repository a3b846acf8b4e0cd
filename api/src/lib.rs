//! # AutoMarket API
//!
//! actix-web front end for the marketplace: account management with email
//! OTP password reset, vehicles, listings enriched with vehicle details,
//! watchlists and transaction reviews.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState, Collaborators};
