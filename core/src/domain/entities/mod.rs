//! Domain entities representing core business objects.

pub mod listing;
pub mod otp;
pub mod review;
pub mod token;
pub mod user;
pub mod vehicle;
pub mod watchlist;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use listing::{
    Listing, ListingFilter, ListingStatus, ListingUpdate, NewListing, MAX_LISTING_PRICE,
};
pub use otp::{OtpIssueResult, CODE_LENGTH, DEFAULT_TTL_SECONDS};
pub use review::{NewReview, Review, ReviewUpdate, MAX_RATING};
pub use token::{AccessToken, Claims, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_ISSUER};
pub use user::{AccountStatus, NewUser, Role, User};
pub use vehicle::{NewVehicle, Vehicle, VehicleUpdate};
pub use watchlist::WatchlistEntry;
