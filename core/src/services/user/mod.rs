//! Account management: registration, login, profile updates, locking and
//! OTP-backed password resets

mod config;
mod service;
mod types;


pub use config::UserServiceConfig;
pub use service::UserService;
pub use types::{AccountUpdate, LoginResult};
