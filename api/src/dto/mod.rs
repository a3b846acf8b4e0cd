//! Request bodies and query strings accepted by the API

pub mod listings;
pub mod reviews;
pub mod users;
pub mod vehicles;
pub mod watchlist;
