//! Listings a user keeps an eye on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub watchlist_id: i64,
    pub user_id: i64,
    pub listing_id: i64,
    pub added_at: DateTime<Utc>,
}
