// ABOUTME: Role resolution and admin gating based on the configured email allow-list
// ABOUTME: Service entry points call require_admin so the check cannot be bypassed by a client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};

/// Role derived from the admin allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// May issue invites, manage courses, and run imports
    Admin,
    /// Regular seller account
    User,
}

impl UserRole {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse from string, defaulting to the unprivileged role
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

/// Resolve the role for an email against the configured allow-list
///
/// Matching is case-insensitive; the allow-list is lowercased at load time.
#[must_use]
pub fn role_for_email(config: &ServerConfig, email: &str) -> UserRole {
    let email = email.trim().to_lowercase();
    if config.admin_emails.iter().any(|admin| *admin == email) {
        UserRole::Admin
    } else {
        UserRole::User
    }
}

/// Whether the email is on the admin allow-list
#[must_use]
pub fn is_admin(config: &ServerConfig, email: &str) -> bool {
    role_for_email(config, email) == UserRole::Admin
}

/// Require the caller to be an admin
///
/// # Errors
///
/// Returns `PermissionDenied` when the email is not on the allow-list.
pub fn require_admin(config: &ServerConfig, email: &str) -> AppResult<()> {
    if is_admin(config, email) {
        Ok(())
    } else {
        Err(AppError::permission_denied(format!(
            "Admin privileges required; {email} is not on the allow-list"
        )))
    }
}
