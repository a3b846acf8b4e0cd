use serde::{Deserialize, Serialize};
use validator::Validate;

use am_core::domain::entities::listing::{ListingFilter, ListingUpdate, NewListing};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListingRequest {
    pub vehicle_id: Option<i64>,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,

    pub price: f64,

    #[serde(default)]
    pub images: Vec<String>,
}

impl From<CreateListingRequest> for NewListing {
    fn from(request: CreateListingRequest) -> Self {
        NewListing {
            vehicle_id: request.vehicle_id,
            title: request.title,
            description: request.description,
            price: request.price,
            images: request.images,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateListingRequest {
    pub vehicle_id: Option<i64>,

    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub price: Option<f64>,

    pub images: Option<Vec<String>>,
}

impl From<UpdateListingRequest> for ListingUpdate {
    fn from(request: UpdateListingRequest) -> Self {
        ListingUpdate {
            vehicle_id: request.vehicle_id,
            title: request.title,
            description: request.description,
            price: request.price,
            images: request.images,
        }
    }
}

/// Moderation status change, e.g. `{"status": "sold"}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Query string of `GET /api/listings/filter`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    pub title: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub mileage_min: Option<i64>,
    pub mileage_max: Option<i64>,
}

impl From<FilterQuery> for ListingFilter {
    fn from(query: FilterQuery) -> Self {
        ListingFilter {
            title: non_blank(query.title),
            min_price: query.min_price,
            max_price: query.max_price,
            brand: non_blank(query.brand),
            model: non_blank(query.model),
            year: query.year,
            min_mileage: query.mileage_min,
            max_mileage: query.mileage_max,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the repeated `id` parameters of `GET /api/compare?id=1&id=2`.
///
/// Any value that is not an integer is rejected with the offending text.
pub fn parse_compare_ids(query: &str) -> Result<Vec<i64>, String> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .filter(|(key, _)| *key == "id")
        .map(|(_, value)| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Invalid listing id: '{}'", value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare_ids() {
        assert_eq!(parse_compare_ids("id=1&id=2&id=3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_compare_ids("id=4&sort=asc&id=9").unwrap(), vec![4, 9]);
        assert!(parse_compare_ids("").unwrap().is_empty());
        assert!(parse_compare_ids("id=1&id=abc").is_err());
        assert!(parse_compare_ids("id").is_err());
    }

    #[test]
    fn test_blank_filter_values_are_ignored() {
        let query = FilterQuery {
            title: Some("  ".into()),
            brand: Some("Toyota".into()),
            mileage_max: Some(50_000),
            ..Default::default()
        };
        let filter = ListingFilter::from(query);
        assert_eq!(filter.title, None);
        assert_eq!(filter.brand.as_deref(), Some("Toyota"));
        assert_eq!(filter.max_mileage, Some(50_000));
    }
}
