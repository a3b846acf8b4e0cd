//! Review repository trait.

use async_trait::async_trait;

use crate::domain::entities::review::{NewReview, Review};
use crate::errors::DomainError;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a review; `DomainError::Conflict` if the reviewer already
    /// reviewed the transaction
    async fn create(&self, reviewer_id: i64, review: NewReview) -> Result<Review, DomainError>;

    async fn find_by_id(&self, review_id: i64) -> Result<Option<Review>, DomainError>;

    async fn find_by_transaction_and_reviewer(
        &self,
        transaction_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Review>, DomainError>;

    /// Reviews of a transaction, newest first
    async fn list_for_transaction(&self, transaction_id: i64) -> Result<Vec<Review>, DomainError>;

    /// Reviews written by a user, newest first
    async fn list_by_reviewer(&self, reviewer_id: i64) -> Result<Vec<Review>, DomainError>;

    async fn update(&self, review: &Review) -> Result<Review, DomainError>;

    async fn delete(&self, review_id: i64) -> Result<bool, DomainError>;
}
