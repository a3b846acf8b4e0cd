//! MySQL implementation of the ReviewRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use am_core::domain::entities::review::{NewReview, Review};
use am_core::errors::DomainError;
use am_core::repositories::ReviewRepository;

use super::{column, db_error, is_unique_violation};

const REVIEW_SELECT: &str =
    "SELECT review_id, transaction_id, reviewer_id, rating, comment, created_at FROM reviews";

pub struct MySqlReviewRepository {
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &MySqlRow) -> Result<Review, DomainError> {
        Ok(Review {
            review_id: column(row, "review_id")?,
            transaction_id: column(row, "transaction_id")?,
            reviewer_id: column(row, "reviewer_id")?,
            rating: column(row, "rating")?,
            comment: column(row, "comment")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    async fn fetch_many(&self, condition: &str, value: i64) -> Result<Vec<Review>, DomainError> {
        let query = format!(
            "{} WHERE {} = ? ORDER BY created_at DESC, review_id DESC",
            REVIEW_SELECT, condition
        );
        let rows = sqlx::query(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        rows.iter().map(Self::row_to_review).collect()
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn create(&self, reviewer_id: i64, review: NewReview) -> Result<Review, DomainError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (transaction_id, reviewer_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.transaction_id)
        .bind(reviewer_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("You have already reviewed this transaction")
            } else {
                DomainError::Database(format!("Failed to create review: {}", e))
            }
        })?;

        Ok(Review {
            review_id: result.last_insert_id() as i64,
            transaction_id: review.transaction_id,
            reviewer_id,
            rating: review.rating,
            comment: review.comment,
            created_at,
        })
    }

    async fn find_by_id(&self, review_id: i64) -> Result<Option<Review>, DomainError> {
        let query = format!("{} WHERE review_id = ?", REVIEW_SELECT);
        let row = sqlx::query(&query)
            .bind(review_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn find_by_transaction_and_reviewer(
        &self,
        transaction_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Review>, DomainError> {
        let query = format!("{} WHERE transaction_id = ? AND reviewer_id = ?", REVIEW_SELECT);
        let row = sqlx::query(&query)
            .bind(transaction_id)
            .bind(reviewer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn list_for_transaction(&self, transaction_id: i64) -> Result<Vec<Review>, DomainError> {
        self.fetch_many("transaction_id", transaction_id).await
    }

    async fn list_by_reviewer(&self, reviewer_id: i64) -> Result<Vec<Review>, DomainError> {
        self.fetch_many("reviewer_id", reviewer_id).await
    }

    async fn update(&self, review: &Review) -> Result<Review, DomainError> {
        let result = sqlx::query("UPDATE reviews SET rating = ?, comment = ? WHERE review_id = ?")
            .bind(review.rating)
            .bind(&review.comment)
            .bind(review.review_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update review"))?;

        if result.rows_affected() == 0 && self.find_by_id(review.review_id).await?.is_none() {
            return Err(DomainError::not_found("Review"));
        }
        Ok(review.clone())
    }

    async fn delete(&self, review_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = ?")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete review"))?;
        Ok(result.rows_affected() > 0)
    }
}
