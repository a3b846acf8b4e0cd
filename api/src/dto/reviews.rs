use serde::{Deserialize, Serialize};
use validator::Validate;

use am_core::domain::entities::review::{NewReview, ReviewUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub transaction_id: i64,

    #[validate(range(max = 5))]
    pub rating: u8,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            transaction_id: request.transaction_id,
            rating: request.rating,
            comment: request.comment,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(max = 5))]
    pub rating: Option<u8>,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewUpdate {
    fn from(request: UpdateReviewRequest) -> Self {
        ReviewUpdate {
            rating: request.rating,
            comment: request.comment,
        }
    }
}
