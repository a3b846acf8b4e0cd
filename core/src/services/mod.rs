//! Business services containing the marketplace use cases.

pub mod auth;
pub mod enrichment;
pub mod listing;
pub mod otp;
pub mod review;
pub mod token;
pub mod user;
pub mod vehicle;

pub use auth::{authorize, PasswordHasher, RoleRequirement};
pub use enrichment::{EnrichmentClient, ListingEnrichmentComposer, VehicleSource};
pub use listing::{ListingActor, ListingService};
pub use otp::{KeyValueStore, Notifier, OtpService, OtpServiceConfig};
pub use review::ReviewService;
pub use token::{TokenService, TokenServiceConfig};
pub use user::{AccountUpdate, LoginResult, UserService, UserServiceConfig};
pub use vehicle::VehicleService;
