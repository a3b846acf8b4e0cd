//! MySQL implementations of the core repository traits

mod listing_repository_impl;
mod review_repository_impl;
mod user_repository_impl;
mod vehicle_repository_impl;
mod watchlist_repository_impl;

pub use listing_repository_impl::MySqlListingRepository;
pub use review_repository_impl::MySqlReviewRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use vehicle_repository_impl::MySqlVehicleRepository;
pub use watchlist_repository_impl::MySqlWatchlistRepository;

use am_core::errors::DomainError;

/// Wrap an SQLx failure with the operation that hit it
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Database(format!("{}: {}", context, e))
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// Read a column, mapping a decode failure to `DomainError::Database`
pub(crate) fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    use sqlx::Row;
    row.try_get(name)
        .map_err(|e| DomainError::Database(format!("Failed to get {}: {}", name, e)))
}
