// ABOUTME: Course record database operations for cohort management
// ABOUTME: Handles insert, lookup by id/name, listing, and the denormalized student count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Course;

const COURSE_COLUMNS: &str = "id, name, course_date, student_count, created_by, created_at";

impl Database {
    /// Insert a new course record
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert_course(&self, course: &Course) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO courses (id, name, course_date, student_count, created_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(&course.id)
        .bind(&course.name)
        .bind(course.course_date.to_rfc3339())
        .bind(course.student_count)
        .bind(&course.created_by)
        .bind(course.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to insert course: {e}")))?;

        Ok(())
    }

    /// Get a course by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_course(&self, course_id: &str) -> AppResult<Option<Course>> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1");

        let row = sqlx::query(&query)
            .bind(course_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get course: {e}")))?;

        row.map(|row| Self::row_to_course(&row)).transpose()
    }

    /// Get a course by its exact name
    ///
    /// Names are unique by convention, not by constraint; if duplicates exist
    /// the oldest record wins so repeated imports stay stable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_course_by_name(&self, name: &str) -> AppResult<Option<Course>> {
        let query = format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE name = ?1 ORDER BY created_at ASC LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get course by name: {e}")))?;

        row.map(|row| Self::row_to_course(&row)).transpose()
    }

    /// Overwrite the denormalized student count for a course
    ///
    /// # Errors
    ///
    /// Returns an error if the course does not exist or the update fails.
    pub async fn update_course_student_count(&self, course_id: &str, count: i64) -> AppResult<()> {
        let result = sqlx::query("UPDATE courses SET student_count = ?1 WHERE id = ?2")
            .bind(count)
            .bind(course_id)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to update student count: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Course not found: {course_id}"
            )));
        }

        Ok(())
    }

    /// List all courses, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list courses: {e}")))?;

        rows.iter().map(Self::row_to_course).collect()
    }

    /// Convert a database row to a `Course`
    fn row_to_course(row: &SqliteRow) -> AppResult<Course> {
        let course_date: String = row.get("course_date");
        let created_at: String = row.get("created_at");

        Ok(Course {
            id: row.get("id"),
            name: row.get("name"),
            course_date: parse_timestamp(&course_date, "courses.course_date")?,
            student_count: row.get("student_count"),
            created_by: row.get("created_by"),
            created_at: parse_timestamp(&created_at, "courses.created_at")?,
        })
    }
}
