//! Authorization checks and password hashing

mod authorization;
mod password;

pub use authorization::{authorize, RoleRequirement};
pub use password::PasswordHasher;
