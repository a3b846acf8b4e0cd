//! MySQL implementation of the ListingRepository trait.
//!
//! Images live in `listing_images`, ordered by `position`, and are loaded in a
//! second query for each batch of listings.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};

use am_core::domain::entities::listing::{Listing, ListingFilter, ListingStatus, NewListing};
use am_core::errors::DomainError;
use am_core::repositories::ListingRepository;

use super::{column, db_error};

const LISTING_SELECT: &str =
    "SELECT listing_id, vehicle_id, seller_id, title, description, price, status, created_at FROM listings";
const NEWEST_FIRST: &str = " ORDER BY created_at DESC, listing_id DESC";

pub struct MySqlListingRepository {
    pool: MySqlPool,
}

impl MySqlListingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_listing(row: &MySqlRow) -> Result<Listing, DomainError> {
        let status: String = column(row, "status")?;
        Ok(Listing {
            listing_id: column(row, "listing_id")?,
            vehicle_id: column(row, "vehicle_id")?,
            seller_id: column(row, "seller_id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            price: column(row, "price")?,
            status: status.parse::<ListingStatus>().map_err(DomainError::Database)?,
            images: Vec::new(),
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    /// Map rows and attach their images
    async fn hydrate(&self, rows: Vec<MySqlRow>) -> Result<Vec<Listing>, DomainError> {
        let mut listings = rows.iter().map(Self::row_to_listing).collect::<Result<Vec<_>, _>>()?;
        if listings.is_empty() {
            return Ok(listings);
        }

        let mut query = QueryBuilder::<MySql>::new("SELECT listing_id, url FROM listing_images WHERE listing_id IN (");
        let mut ids = query.separated(", ");
        for listing in &listings {
            ids.push_bind(listing.listing_id);
        }
        query.push(") ORDER BY listing_id, position");

        let image_rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load listing images"))?;

        let mut images: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &image_rows {
            let listing_id: i64 = column(row, "listing_id")?;
            images.entry(listing_id).or_default().push(column(row, "url")?);
        }
        for listing in &mut listings {
            listing.images = images.remove(&listing.listing_id).unwrap_or_default();
        }
        Ok(listings)
    }

    async fn replace_images(
        tx: &mut Transaction<'_, MySql>,
        listing_id: i64,
        images: &[String],
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM listing_images WHERE listing_id = ?")
            .bind(listing_id)
            .execute(&mut **tx)
            .await
            .map_err(db_error("Failed to clear listing images"))?;

        for (position, url) in images.iter().enumerate() {
            sqlx::query("INSERT INTO listing_images (listing_id, position, url) VALUES (?, ?, ?)")
                .bind(listing_id)
                .bind(position as i32)
                .bind(url)
                .execute(&mut **tx)
                .await
                .map_err(db_error("Failed to store listing image"))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn create(&self, seller_id: i64, listing: NewListing) -> Result<Listing, DomainError> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        let result = sqlx::query(
            r#"
            INSERT INTO listings (vehicle_id, seller_id, title, description, price, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(listing.vehicle_id)
        .bind(seller_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(ListingStatus::Available.as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to create listing"))?;

        let listing_id = result.last_insert_id() as i64;
        Self::replace_images(&mut tx, listing_id, &listing.images).await?;
        tx.commit().await.map_err(db_error("Failed to commit listing"))?;

        Ok(Listing {
            listing_id,
            vehicle_id: listing.vehicle_id,
            seller_id,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            status: ListingStatus::Available,
            images: listing.images,
            created_at,
        })
    }

    async fn find_by_id(&self, listing_id: i64) -> Result<Option<Listing>, DomainError> {
        let query = format!("{} WHERE listing_id = ?", LISTING_SELECT);
        let rows = sqlx::query(&query)
            .bind(listing_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        Ok(self.hydrate(rows).await?.into_iter().next())
    }

    async fn find_by_ids(&self, listing_ids: &[i64]) -> Result<Vec<Listing>, DomainError> {
        if listing_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<MySql>::new(LISTING_SELECT);
        query.push(" WHERE listing_id IN (");
        let mut ids = query.separated(", ");
        for id in listing_ids {
            ids.push_bind(*id);
        }
        query.push(")");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        self.hydrate(rows).await
    }

    async fn list_available(&self) -> Result<Vec<Listing>, DomainError> {
        let query = format!("{} WHERE status = ?{}", LISTING_SELECT, NEWEST_FIRST);
        let rows = sqlx::query(&query)
            .bind(ListingStatus::Available.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        self.hydrate(rows).await
    }

    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DomainError> {
        let mut query = QueryBuilder::<MySql>::new(LISTING_SELECT);
        query.push(" WHERE status = ");
        query.push_bind(ListingStatus::Available.as_str());

        if let Some(title) = &filter.title {
            query.push(" AND title LIKE CONCAT('%', ");
            query.push_bind(title.clone());
            query.push(", '%')");
        }
        if let Some(min_price) = filter.min_price {
            query.push(" AND price >= ");
            query.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            query.push(" AND price <= ");
            query.push_bind(max_price);
        }
        query.push(NEWEST_FIRST);

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        self.hydrate(rows).await
    }

    async fn update(&self, listing: &Listing) -> Result<Listing, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE listings SET
                vehicle_id = ?,
                title = ?,
                description = ?,
                price = ?,
                status = ?
            WHERE listing_id = ?
            "#,
        )
        .bind(listing.vehicle_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(listing.status.as_str())
        .bind(listing.listing_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update listing"))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query("SELECT 1 FROM listings WHERE listing_id = ?")
                .bind(listing.listing_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Database query failed"))?;
            if exists.is_none() {
                return Err(DomainError::not_found("Listing"));
            }
        }

        Self::replace_images(&mut tx, listing.listing_id, &listing.images).await?;
        tx.commit().await.map_err(db_error("Failed to commit listing"))?;
        Ok(listing.clone())
    }

    async fn delete(&self, listing_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM listings WHERE listing_id = ?")
            .bind(listing_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete listing"))?;
        Ok(result.rows_affected() > 0)
    }
}
