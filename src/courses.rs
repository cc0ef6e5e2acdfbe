// ABOUTME: Course service: lazy get-or-create cohorts and the denormalized student count
// ABOUTME: Course names that start with a date (2026/04/11 or 2026-04-11) set the course date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::config::ServerConfig;
use crate::database::RemoteStore;
use crate::errors::{AppError, AppResult};
use crate::models::Course;
use crate::permissions;

/// Parse a leading `YYYY/MM/DD` or `YYYY-MM-DD` date from a course name
///
/// Only the first ten characters are considered, so "2026/04/11 Sales 101"
/// parses and "Sales 101 (2026/04/11)" does not.
#[must_use]
pub fn parse_leading_date(name: &str) -> Option<NaiveDate> {
    let head = name.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%Y-%m-%d"))
        .ok()
}

/// Course operations over the remote store
#[derive(Clone)]
pub struct CourseService {
    remote: RemoteStore,
    config: ServerConfig,
}

impl CourseService {
    /// Create the service
    #[must_use]
    pub const fn new(remote: RemoteStore, config: ServerConfig) -> Self {
        Self { remote, config }
    }

    /// Find a course by exact trimmed name, creating it on first reference
    /// (admin only)
    ///
    /// New courses take their date from a leading date in the name, falling
    /// back to the creation time when the name carries none.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the name is blank, or
    /// the store operation fails.
    pub async fn get_or_create(&self, issuer_email: &str, name: &str) -> AppResult<Course> {
        permissions::require_admin(&self.config, issuer_email)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("course name"));
        }

        let db = self.remote.database()?;

        if let Some(existing) = db.get_course_by_name(name).await? {
            return Ok(existing);
        }

        let course_date: DateTime<Utc> = parse_leading_date(name)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map_or_else(Utc::now, |dt| dt.and_utc());

        let course = Course::new(
            name.to_owned(),
            course_date,
            issuer_email.trim().to_lowercase(),
        );
        db.insert_course(&course).await?;

        info!(course_id = %course.id, name = %course.name, "Created course");
        Ok(course)
    }

    /// Get a course by id (admin only)
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the course does not
    /// exist, or the query fails.
    pub async fn get(&self, issuer_email: &str, course_id: &str) -> AppResult<Course> {
        permissions::require_admin(&self.config, issuer_email)?;
        self.remote
            .database()?
            .get_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course not found: {course_id}")))
    }

    /// Overwrite the student count for a course (admin only)
    ///
    /// The caller computes the count, normally by re-listing the course's
    /// invites. The write is a plain overwrite with no transaction against
    /// the listing it was computed from.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the course does not
    /// exist, or the update fails.
    pub async fn update_student_count(
        &self,
        issuer_email: &str,
        course_id: &str,
        count: i64,
    ) -> AppResult<()> {
        permissions::require_admin(&self.config, issuer_email)?;
        self.remote
            .database()?
            .update_course_student_count(course_id, count)
            .await
    }

    /// List all courses, newest first (admin only)
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin or the query fails.
    pub async fn list_all(&self, issuer_email: &str) -> AppResult<Vec<Course>> {
        permissions::require_admin(&self.config, issuer_email)?;
        self.remote.database()?.list_courses().await
    }
}
