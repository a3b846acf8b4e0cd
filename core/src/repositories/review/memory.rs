use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::review::{NewReview, Review};
use crate::errors::DomainError;

use super::trait_::ReviewRepository;

pub struct InMemoryReviewRepository {
    reviews: RwLock<HashMap<i64, Review>>,
    next_id: AtomicI64,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    async fn collect_newest_first(&self, predicate: impl Fn(&Review) -> bool) -> Vec<Review> {
        let reviews = self.reviews.read().await;
        let mut found: Vec<Review> = reviews.values().filter(|r| predicate(r)).cloned().collect();
        found.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.review_id.cmp(&a.review_id))
        });
        found
    }
}

impl Default for InMemoryReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, reviewer_id: i64, review: NewReview) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        if reviews
            .values()
            .any(|r| r.transaction_id == review.transaction_id && r.reviewer_id == reviewer_id)
        {
            return Err(DomainError::conflict(
                "You have already reviewed this transaction",
            ));
        }

        let review_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let review = review.into_review(review_id, reviewer_id);
        reviews.insert(review_id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, review_id: i64) -> Result<Option<Review>, DomainError> {
        Ok(self.reviews.read().await.get(&review_id).cloned())
    }

    async fn find_by_transaction_and_reviewer(
        &self,
        transaction_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .find(|r| r.transaction_id == transaction_id && r.reviewer_id == reviewer_id)
            .cloned())
    }

    async fn list_for_transaction(&self, transaction_id: i64) -> Result<Vec<Review>, DomainError> {
        Ok(self
            .collect_newest_first(|r| r.transaction_id == transaction_id)
            .await)
    }

    async fn list_by_reviewer(&self, reviewer_id: i64) -> Result<Vec<Review>, DomainError> {
        Ok(self.collect_newest_first(|r| r.reviewer_id == reviewer_id).await)
    }

    async fn update(&self, review: &Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        match reviews.get_mut(&review.review_id) {
            Some(stored) => {
                *stored = review.clone();
                Ok(review.clone())
            }
            None => Err(DomainError::not_found("Review")),
        }
    }

    async fn delete(&self, review_id: i64) -> Result<bool, DomainError> {
        Ok(self.reviews.write().await.remove(&review_id).is_some())
    }
}
