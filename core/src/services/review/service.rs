use std::sync::Arc;

use crate::domain::entities::review::{NewReview, Review, ReviewUpdate};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ReviewRepository;

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn create(&self, reviewer_id: i64, review: NewReview) -> DomainResult<Review> {
        review.validate()?;
        if self
            .reviews
            .find_by_transaction_and_reviewer(review.transaction_id, reviewer_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("You have already reviewed this transaction"));
        }

        let review = self.reviews.create(reviewer_id, review).await?;
        tracing::info!(
            review_id = review.review_id,
            transaction_id = review.transaction_id,
            reviewer_id,
            rating = review.rating,
            event = "review_created",
            "Review created"
        );
        Ok(review)
    }

    pub async fn update(&self, review_id: i64, reviewer_id: i64, update: ReviewUpdate) -> DomainResult<Review> {
        update.validate()?;
        let mut review = self.owned(review_id, reviewer_id).await?;
        update.apply_to(&mut review);
        let review = self.reviews.update(&review).await?;
        tracing::info!(review_id, reviewer_id, event = "review_updated", "Review updated");
        Ok(review)
    }

    pub async fn delete(&self, review_id: i64, reviewer_id: i64) -> DomainResult<()> {
        self.owned(review_id, reviewer_id).await?;
        self.reviews.delete(review_id).await?;
        tracing::info!(review_id, reviewer_id, event = "review_deleted", "Review deleted");
        Ok(())
    }

    pub async fn list_for_transaction(&self, transaction_id: i64) -> DomainResult<Vec<Review>> {
        self.reviews.list_for_transaction(transaction_id).await
    }

    pub async fn list_by_reviewer(&self, reviewer_id: i64) -> DomainResult<Vec<Review>> {
        self.reviews.list_by_reviewer(reviewer_id).await
    }

    async fn owned(&self, review_id: i64, reviewer_id: i64) -> DomainResult<Review> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))?;
        if review.reviewer_id != reviewer_id {
            return Err(DomainError::forbidden("Only the author may change this review"));
        }
        Ok(review)
    }
}
