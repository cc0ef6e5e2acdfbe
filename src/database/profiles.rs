// ABOUTME: Seller profile document operations against the remote store
// ABOUTME: One JSON document per account, written with last-write-wins upsert semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Profile;

impl Database {
    /// Save or replace the profile document for an account
    ///
    /// Concurrent writers race without detection; the later write wins, which
    /// mirrors how the profile form behaves across devices.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails.
    pub async fn upsert_profile(&self, user_id: Uuid, profile: &Profile) -> AppResult<()> {
        let profile_json = serde_json::to_string(profile)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO profiles (user_id, profile_data, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ON CONFLICT (user_id)
            DO UPDATE SET
                profile_data = EXCLUDED.profile_data,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(&profile_json)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to save profile: {e}")))?;

        Ok(())
    }

    /// Load the profile document for an account, if one has been saved
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored document
    /// cannot be deserialized.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query("SELECT profile_data FROM profiles WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to load profile: {e}")))?;

        row.map(|row| {
            let profile_json: String = row.get("profile_data");
            serde_json::from_str(&profile_json)
                .map_err(|e| AppError::internal(format!("Corrupt profile document: {e}")))
        })
        .transpose()
    }
}
