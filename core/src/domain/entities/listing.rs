//! Marketplace listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::VehicleSnapshot;
use crate::errors::{DomainError, DomainResult};

/// Exclusive upper bound for a listing price
pub const MAX_LISTING_PRICE: f64 = 100_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    #[default]
    Available,
    Sold,
    Rejected,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Available => "available",
            ListingStatus::Sold => "sold",
            ListingStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ListingStatus::Pending),
            "available" => Ok(ListingStatus::Available),
            "sold" => Ok(ListingStatus::Sold),
            "rejected" => Ok(ListingStatus::Rejected),
            other => Err(format!("Unknown listing status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: i64,
    /// Vehicle record in the vehicle service, if the listing is tied to one
    pub vehicle_id: Option<i64>,
    pub seller_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub status: ListingStatus,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_available(&self) -> bool {
        self.status == ListingStatus::Available
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub vehicle_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewListing {
    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)?;
        validate_price(self.price)
    }

    pub(crate) fn into_listing(self, listing_id: i64, seller_id: i64) -> Listing {
        Listing {
            listing_id,
            vehicle_id: self.vehicle_id,
            seller_id,
            title: self.title,
            description: self.description,
            price: self.price,
            status: ListingStatus::Available,
            images: self.images,
            created_at: Utc::now(),
        }
    }
}

/// Partial update; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingUpdate {
    pub vehicle_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub images: Option<Vec<String>>,
}

impl ListingUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(vehicle_id) = self.vehicle_id {
            listing.vehicle_id = Some(vehicle_id);
        }
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(description) = self.description {
            listing.description = Some(description);
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(images) = self.images {
            listing.images = images;
        }
    }
}

/// Search criteria for available listings.
///
/// Title and price criteria are evaluated by the repository. Vehicle criteria
/// are evaluated against enrichment results, so a listing whose vehicle details
/// could not be fetched never matches a vehicle criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub title: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub min_mileage: Option<i64>,
    pub max_mileage: Option<i64>,
}

impl ListingFilter {
    pub fn validate(&self) -> DomainResult<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::Validation {
                    message: "min_price must not exceed max_price".to_string(),
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_mileage, self.max_mileage) {
            if min > max {
                return Err(DomainError::Validation {
                    message: "min_mileage must not exceed max_mileage".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn has_vehicle_criteria(&self) -> bool {
        self.brand.is_some()
            || self.model.is_some()
            || self.year.is_some()
            || self.min_mileage.is_some()
            || self.max_mileage.is_some()
    }

    /// Title substring (case-insensitive) and inclusive price bounds
    pub fn matches_listing(&self, listing: &Listing) -> bool {
        if let Some(title) = &self.title {
            if !listing.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        true
    }

    pub fn matches_vehicle(&self, vehicle: &VehicleSnapshot) -> bool {
        if let Some(brand) = &self.brand {
            if !vehicle.brand.eq_ignore_ascii_case(brand) {
                return false;
            }
        }
        if let Some(model) = &self.model {
            if !vehicle.model.to_lowercase().contains(&model.to_lowercase()) {
                return false;
            }
        }
        if self.year.is_some_and(|year| vehicle.year != year) {
            return false;
        }
        if self.min_mileage.is_some_and(|min| vehicle.mileage < min) {
            return false;
        }
        if self.max_mileage.is_some_and(|max| vehicle.mileage > max) {
            return false;
        }
        true
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation {
            message: "title must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price <= 0.0 || price >= MAX_LISTING_PRICE {
        return Err(DomainError::Validation {
            message: format!("price must be greater than 0 and less than {}", MAX_LISTING_PRICE),
        });
    }
    Ok(())
}
