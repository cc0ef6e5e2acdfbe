// ABOUTME: Invite code database operations covering issue, lookup, redeem, and listing
// ABOUTME: Codes are matched case-insensitively by storing them uppercase and emails lowercase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_optional_timestamp, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{InviteCode, InviteStatus};

const INVITE_COLUMNS: &str =
    "id, code, email, name, status, course_id, created_by, created_at, used_at";

impl Database {
    /// Insert a freshly issued invite code
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert_invite_code(&self, invite: &InviteCode) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO invite_codes (id, code, email, name, status, course_id, created_by, created_at, used_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL)
            ",
        )
        .bind(&invite.id)
        .bind(&invite.code)
        .bind(&invite.email)
        .bind(&invite.name)
        .bind(invite.status.as_str())
        .bind(&invite.course_id)
        .bind(&invite.created_by)
        .bind(invite.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to insert invite code: {e}")))?;

        Ok(())
    }

    /// Find an unused invite already issued to this email for this course
    ///
    /// Used as a pre-insert duplicate check. `course_id` is matched with IS so
    /// a `None` course only collides with other course-less invites.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_unused_invite(
        &self,
        email: &str,
        course_id: Option<&str>,
    ) -> AppResult<Option<InviteCode>> {
        let query = format!(
            "SELECT {INVITE_COLUMNS} FROM invite_codes \
             WHERE email = ?1 AND course_id IS ?2 AND status = ?3"
        );

        let row = sqlx::query(&query)
            .bind(email.to_lowercase())
            .bind(course_id)
            .bind(InviteStatus::Unused.as_str())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to check for existing invite: {e}")))?;

        row.map(|row| Self::row_to_invite(&row)).transpose()
    }

    /// Find an invite by its code and the email it was issued for
    ///
    /// Inputs are normalized (code uppercased, email lowercased) before the
    /// lookup, so validation is case-insensitive for the person typing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_invite_by_code_and_email(
        &self,
        code: &str,
        email: &str,
    ) -> AppResult<Option<InviteCode>> {
        let query =
            format!("SELECT {INVITE_COLUMNS} FROM invite_codes WHERE code = ?1 AND email = ?2");

        let row = sqlx::query(&query)
            .bind(code.trim().to_uppercase())
            .bind(email.trim().to_lowercase())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to look up invite code: {e}")))?;

        row.map(|row| Self::row_to_invite(&row)).transpose()
    }

    /// Mark an invite as redeemed
    ///
    /// The update is unconditional: redeeming an already-used invite rewrites
    /// `used_at` and stays used. The status never moves back to unused.
    ///
    /// # Errors
    ///
    /// Returns an error if the invite does not exist or the update fails.
    pub async fn mark_invite_used(&self, invite_id: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE invite_codes SET status = ?1, used_at = ?2 WHERE id = ?3")
            .bind(InviteStatus::Used.as_str())
            .bind(Utc::now().to_rfc3339())
            .bind(invite_id)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to mark invite used: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invite code not found: {invite_id}"
            )));
        }

        Ok(())
    }

    /// List invites for one course, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_invites_for_course(&self, course_id: &str) -> AppResult<Vec<InviteCode>> {
        let query = format!(
            "SELECT {INVITE_COLUMNS} FROM invite_codes \
             WHERE course_id = ?1 ORDER BY created_at DESC"
        );

        let rows = sqlx::query(&query)
            .bind(course_id)
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list invites for course: {e}")))?;

        rows.iter().map(Self::row_to_invite).collect()
    }

    /// List every invite, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_invites(&self) -> AppResult<Vec<InviteCode>> {
        let query = format!("SELECT {INVITE_COLUMNS} FROM invite_codes ORDER BY created_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list invites: {e}")))?;

        rows.iter().map(Self::row_to_invite).collect()
    }

    /// Delete an invite (revocation)
    ///
    /// # Errors
    ///
    /// Returns an error if the invite does not exist or the delete fails.
    pub async fn delete_invite(&self, invite_id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM invite_codes WHERE id = ?1")
            .bind(invite_id)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to delete invite: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invite code not found: {invite_id}"
            )));
        }

        Ok(())
    }

    /// Convert a database row to an `InviteCode`
    fn row_to_invite(row: &SqliteRow) -> AppResult<InviteCode> {
        let status: String = row.get("status");
        let created_at: String = row.get("created_at");
        let used_at: Option<String> = row.get("used_at");

        Ok(InviteCode {
            id: row.get("id"),
            code: row.get("code"),
            email: row.get("email"),
            name: row.get("name"),
            status: InviteStatus::parse(&status),
            course_id: row.get("course_id"),
            created_by: row.get("created_by"),
            created_at: parse_timestamp(&created_at, "invite_codes.created_at")?,
            used_at: parse_optional_timestamp(used_at.as_deref(), "invite_codes.used_at")?,
        })
    }
}
