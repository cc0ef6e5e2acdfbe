// ABOUTME: Remote document store built on SQLite with an embedded migration system
// ABOUTME: Owns the connection pool, system secrets, and shared timestamp helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

/// Course record operations
pub mod courses;
/// Invite code record operations
pub mod invite_codes;
/// Seller profile document operations
pub mod profiles;
/// Configured-vs-absent wrapper around the store
pub mod remote;
/// Account record operations
pub mod users;

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

use crate::constants::session;
use crate::errors::{AppError, AppResult};

pub use remote::RemoteStore;

/// Database connection pool for the remote document store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL is invalid or malformed
    /// - Database connection fails
    /// - `SQLite` file creation fails
    /// - Migration process fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };

        db.migrate()
            .await
            .map_err(|e| AppError::database(format!("Database migration failed: {e}")))?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run all pending migrations embedded at compile time from ./migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails or the connection is lost.
    pub async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get a system secret, generating and persisting it on first use
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or insert fails.
    pub async fn get_or_create_system_secret(&self, secret_type: &str) -> AppResult<String> {
        if let Some(secret) = self.get_system_secret(secret_type).await? {
            return Ok(secret);
        }

        let secret_value = Self::generate_secret();

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO system_secrets (secret_type, secret_value, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        )
        .bind(secret_type)
        .bind(&secret_value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store system secret: {e}")))?;

        info!(secret_type, "Generated new system secret");
        Ok(secret_value)
    }

    /// Get a system secret if one exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_system_secret(&self, secret_type: &str) -> AppResult<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT secret_value FROM system_secrets WHERE secret_type = ?1")
                .bind(secret_type)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to get system secret: {e}")))?;

        Ok(row.map(|(value,)| value))
    }

    /// Generate a random alphanumeric secret
    fn generate_secret() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(session::SECRET_LENGTH)
            .map(char::from)
            .collect()
    }
}

/// Parse an RFC 3339 timestamp stored as TEXT
///
/// # Errors
///
/// Returns an internal error naming the column when the stored value is not
/// valid RFC 3339.
pub(crate) fn parse_timestamp(value: &str, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp in {column}: {e}")))
}

/// Parse an optional RFC 3339 timestamp stored as nullable TEXT
pub(crate) fn parse_optional_timestamp(
    value: Option<&str>,
    column: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(v, column)).transpose()
}
