//! Reviews left on completed transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub transaction_id: i64,
    pub reviewer_id: i64,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub transaction_id: i64,
    pub rating: u8,
    pub comment: Option<String>,
}

impl NewReview {
    pub fn validate(&self) -> DomainResult<()> {
        validate_rating(self.rating)
    }

    pub(crate) fn into_review(self, review_id: i64, reviewer_id: i64) -> Review {
        Review {
            review_id,
            transaction_id: self.transaction_id,
            reviewer_id,
            rating: self.rating,
            comment: self.comment,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

impl ReviewUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        match self.rating {
            Some(rating) => validate_rating(rating),
            None => Ok(()),
        }
    }

    pub fn apply_to(self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(comment) = self.comment {
            review.comment = Some(comment);
        }
    }
}

fn validate_rating(rating: u8) -> DomainResult<()> {
    if rating > MAX_RATING {
        return Err(DomainError::Validation {
            message: format!("rating must be between 0 and {}", MAX_RATING),
        });
    }
    Ok(())
}
