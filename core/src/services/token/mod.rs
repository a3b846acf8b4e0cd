//! Token service module for JWT access tokens

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
