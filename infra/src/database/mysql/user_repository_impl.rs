//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use am_core::domain::entities::user::{AccountStatus, NewUser, Role, User};
use am_core::errors::DomainError;
use am_core::repositories::UserRepository;

use super::{column, db_error, is_unique_violation};

const USER_COLUMNS: &str = "user_id, username, email, password_hash, role, status, created_at";

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let role: String = column(row, "role")?;
        let status: String = column(row, "status")?;

        Ok(User {
            user_id: column(row, "user_id")?,
            username: column(row, "username")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            role: role.parse().map_err(DomainError::Database)?,
            status: status.parse().map_err(DomainError::Database)?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    async fn find_one(&self, condition: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} LIMIT 1", USER_COLUMNS, condition);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE user_id = ? LIMIT 1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email = ?", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username = ?", username).await
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE username = ? OR email = ? ORDER BY user_id LIMIT 1",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(login)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY user_id", USER_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Database query failed"))?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, role, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("Username or email already exists")
            } else {
                DomainError::Database(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(User {
            user_id: result.last_insert_id() as i64,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            status: user.status,
            created_at,
        })
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = ?,
                email = ?,
                password_hash = ?,
                role = ?,
                status = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(user.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("Username or email already exists")
            } else {
                DomainError::Database(format!("Failed to update user: {}", e))
            }
        })?;

        // MySQL reports zero affected rows when nothing changed, so confirm existence
        if result.rows_affected() == 0 && self.find_by_id(user.user_id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }
        Ok(user.clone())
    }

    async fn delete(&self, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
