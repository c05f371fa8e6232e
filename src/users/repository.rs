// Database repository for user records

use sqlx::PgPool;

use crate::users::{error::UserError, models::User};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, phone, points, is_active, created_at";

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A unique-constraint violation from a concurrent
    /// registration is translated into the matching duplicate error rather
    /// than surfacing as a server error.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        phone: Option<&str>,
    ) -> Result<User, UserError> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return match db_err.constraint() {
                            Some(c) if c.contains("email") => UserError::AlreadyRegisteredEmail,
                            _ => UserError::AlreadyRegisteredUsername,
                        };
                    }
                }
                UserError::Database(e)
            })?;

        Ok(user)
    }

    /// Find a user by email (exact match)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find a user by username (exact match)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }
}
