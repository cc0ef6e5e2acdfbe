// ABOUTME: Bulk invite import: group rows by course, issue codes, refresh student counts
// ABOUTME: Duplicate invites are logged and skipped so partial re-imports never halt the batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use tracing::{debug, info, warn};

use crate::courses::CourseService;
use crate::errors::{AppResult, ErrorCode};
use crate::invites::InviteService;

/// One student row from an import sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// Course the student belongs to
    pub course_name: String,
    /// Student display name
    pub student_name: String,
    /// Student email the invite will be issued for
    pub email: String,
}

/// What one import pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Invites issued in this pass
    pub created: usize,
    /// Rows skipped because an unused invite already existed
    pub duplicates: usize,
    /// Rows dropped for missing one of the three fields
    pub dropped: usize,
    /// Ids of every course touched, in first-seen order
    pub course_ids: Vec<String>,
}

/// Parse comma-separated import text into rows
///
/// The first line is a header and is always skipped. Fields are trimmed;
/// columns past the third are ignored. Rows with missing fields are kept
/// here and dropped during import, so any external parser feeding
/// [`import_rows`] gets the same treatment.
#[must_use]
pub fn parse_rows(text: &str) -> Vec<ImportRow> {
    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let columns: Vec<&str> = line.split(',').map(str::trim).collect();
            ImportRow {
                course_name: columns.first().copied().unwrap_or_default().to_owned(),
                student_name: columns.get(1).copied().unwrap_or_default().to_owned(),
                email: columns.get(2).copied().unwrap_or_default().to_owned(),
            }
        })
        .collect()
}

/// Import a batch of rows: get-or-create each course, issue one invite per
/// student, then recompute each course's student count
///
/// Rows missing any field are silently dropped (counted in the summary).
/// A row whose (email, course) pair already has an unused invite is logged
/// and skipped; every other failure aborts the batch.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the remote store is not
/// configured, or any non-duplicate store operation fails.
pub async fn import_rows(
    invites: &InviteService,
    courses: &CourseService,
    issuer_email: &str,
    rows: &[ImportRow],
) -> AppResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    // Group by course name, preserving first-seen order so log output and
    // course creation follow the sheet.
    let mut groups: Vec<(&str, Vec<&ImportRow>)> = Vec::new();
    for row in rows {
        let course_name = row.course_name.trim();
        if course_name.is_empty()
            || row.student_name.trim().is_empty()
            || row.email.trim().is_empty()
        {
            debug!(?row, "Dropping incomplete import row");
            summary.dropped += 1;
            continue;
        }
        match groups.iter_mut().find(|(name, _)| *name == course_name) {
            Some((_, members)) => members.push(row),
            None => groups.push((course_name, vec![row])),
        }
    }

    for (course_name, members) in groups {
        let course = courses.get_or_create(issuer_email, course_name).await?;

        for row in members {
            match invites
                .create(issuer_email, &row.student_name, &row.email, Some(&course.id))
                .await
            {
                Ok(_) => summary.created += 1,
                Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                    warn!(
                        email = %row.email,
                        course = %course_name,
                        "Skipping duplicate invite during import"
                    );
                    summary.duplicates += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let student_count = invites.list_by_course(issuer_email, &course.id).await?.len();
        courses
            .update_student_count(issuer_email, &course.id, student_count as i64)
            .await?;

        summary.course_ids.push(course.id);
    }

    info!(
        created = summary.created,
        duplicates = summary.duplicates,
        dropped = summary.dropped,
        courses = summary.course_ids.len(),
        "Import pass complete"
    );
    Ok(summary)
}
