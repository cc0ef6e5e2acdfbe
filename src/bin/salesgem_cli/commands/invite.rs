// ABOUTME: Invite management commands for salesgem-cli
// ABOUTME: Issues, lists, and revokes single-use invite codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use salesgem::errors::AppResult;
use salesgem::invites::InviteService;
use salesgem::models::InviteCode;

/// Issue a new invite code
pub async fn create(
    invites: &InviteService,
    issuer: &str,
    name: &str,
    email: &str,
    course: Option<&str>,
) -> AppResult<()> {
    let invite = invites.create(issuer, name, email, course).await?;
    println!("Invite created:");
    print_invite(&invite);
    Ok(())
}

/// List invites, restricted to one course when given
pub async fn list(invites: &InviteService, issuer: &str, course: Option<&str>) -> AppResult<()> {
    let entries = match course {
        Some(course_id) => invites.list_by_course(issuer, course_id).await?,
        None => invites.list_all(issuer).await?,
    };

    if entries.is_empty() {
        println!("No invites found");
        return Ok(());
    }

    println!("{} invite(s):", entries.len());
    for invite in &entries {
        print_invite(invite);
    }
    Ok(())
}

/// Delete an invite by id
pub async fn revoke(invites: &InviteService, issuer: &str, id: &str) -> AppResult<()> {
    invites.delete(issuer, id).await?;
    println!("Deleted invite {id}");
    Ok(())
}

fn print_invite(invite: &InviteCode) {
    println!(
        "  {}  {:<6}  {} <{}>  issued {}",
        invite.code,
        invite.status.as_str(),
        invite.name,
        invite.email,
        invite.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(course_id) = &invite.course_id {
        println!("      course: {course_id}");
    }
}
