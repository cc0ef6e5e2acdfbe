// ABOUTME: Roster import command for salesgem-cli
// ABOUTME: Reads a comma-separated roster file and runs the bulk invite import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use std::path::Path;

use salesgem::courses::CourseService;
use salesgem::errors::{AppError, AppResult};
use salesgem::import::{self, ImportSummary};
use salesgem::invites::InviteService;

/// Import a roster file: create courses, issue invites, refresh counts
pub async fn run(
    invites: &InviteService,
    courses: &CourseService,
    issuer: &str,
    file: &Path,
) -> AppResult<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| AppError::storage(format!("Failed to read {}: {e}", file.display())))?;

    let rows = import::parse_rows(&text);
    if rows.is_empty() {
        println!("Nothing to import: no data rows in {}", file.display());
        return Ok(());
    }

    let summary = import::import_rows(invites, courses, issuer, &rows).await?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    println!("Import finished:");
    println!("  invites created:    {}", summary.created);
    println!("  duplicates skipped: {}", summary.duplicates);
    println!("  rows dropped:       {}", summary.dropped);
    println!("  courses touched:    {}", summary.course_ids.len());
    for course_id in &summary.course_ids {
        println!("    {course_id}");
    }
}
