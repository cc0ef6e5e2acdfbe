// ABOUTME: Invite code service: issue, validate, redeem, list, and revoke single-use codes
// ABOUTME: Validation misses are structured results; only infrastructure failures become errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::info;

use crate::config::ServerConfig;
use crate::constants::invite;
use crate::database::RemoteStore;
use crate::errors::{AppError, AppResult};
use crate::models::{InviteCode, InviteStatus};
use crate::permissions;

/// Why an invite code failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteRejection {
    /// No invite matches the (code, email) pair
    NotFound,
    /// The invite exists but has already been redeemed
    AlreadyUsed,
}

impl InviteRejection {
    /// Message shown to the person typing the code
    #[must_use]
    pub const fn human_message(&self) -> &'static str {
        match self {
            Self::NotFound => {
                "Invite code not found. Check the code and the email it was sent to."
            }
            Self::AlreadyUsed => "This invite code has already been used.",
        }
    }
}

/// Outcome of validating a code against an email
///
/// A miss is a value, not an error: the sign-up form shows the rejection
/// message inline and lets the user retype. Errors are reserved for the store
/// being unreachable.
#[derive(Debug, Clone)]
pub enum InviteValidation {
    /// The code matches and is still unused
    Valid(InviteCode),
    /// The code cannot be redeemed
    Invalid(InviteRejection),
}

impl InviteValidation {
    /// Whether the code can be redeemed
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The matched invite, when valid
    #[must_use]
    pub const fn invite(&self) -> Option<&InviteCode> {
        match self {
            Self::Valid(invite) => Some(invite),
            Self::Invalid(_) => None,
        }
    }

    /// The rejection reason, when invalid
    #[must_use]
    pub const fn rejection(&self) -> Option<InviteRejection> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(rejection) => Some(*rejection),
        }
    }
}

/// Invite code operations over the remote store
#[derive(Clone)]
pub struct InviteService {
    remote: RemoteStore,
    config: ServerConfig,
}

impl InviteService {
    /// Create the service
    #[must_use]
    pub const fn new(remote: RemoteStore, config: ServerConfig) -> Self {
        Self { remote, config }
    }

    /// Issue a new invite code for one student (admin only)
    ///
    /// At most one unused invite may exist per (email, course) pair. The check
    /// is a read-before-write, not a transaction: two racing creates can slip
    /// a duplicate through, which the original flow accepts for a 6-character
    /// human-typed code issued by a single admin.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issuer is not on the admin allow-list
    /// - `name` or `email` is blank
    /// - An unused invite already exists for this (email, course) pair
    /// - The remote store is not configured or the write fails
    pub async fn create(
        &self,
        issuer_email: &str,
        name: &str,
        email: &str,
        course_id: Option<&str>,
    ) -> AppResult<InviteCode> {
        permissions::require_admin(&self.config, issuer_email)?;

        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if email.is_empty() {
            return Err(AppError::missing_field("email"));
        }

        let db = self.remote.database()?;

        if let Some(existing) = db.find_unused_invite(&email, course_id).await? {
            return Err(AppError::already_exists(format!(
                "An unused invite ({}) already exists for {email}",
                existing.code
            )));
        }

        let invite = InviteCode::new(
            Self::generate_code(),
            &email,
            name.to_owned(),
            course_id.map(str::to_owned),
            issuer_email.trim().to_lowercase(),
        );
        db.insert_invite_code(&invite).await?;

        info!(
            code = %invite.code,
            email = %invite.email,
            course_id = ?invite.course_id,
            "Issued invite code"
        );
        Ok(invite)
    }

    /// Validate a code against the email it was issued for
    ///
    /// Case-insensitive on both fields: the code is uppercased and the email
    /// lowercased before the lookup.
    ///
    /// # Errors
    ///
    /// Returns an error only if the remote store is not configured or the
    /// query fails. A code that doesn't match is an `Invalid` result.
    pub async fn validate(&self, code: &str, email: &str) -> AppResult<InviteValidation> {
        let db = self.remote.database()?;

        match db.find_invite_by_code_and_email(code, email).await? {
            Some(invite) if invite.status == InviteStatus::Used => {
                Ok(InviteValidation::Invalid(InviteRejection::AlreadyUsed))
            }
            Some(invite) => Ok(InviteValidation::Valid(invite)),
            None => Ok(InviteValidation::Invalid(InviteRejection::NotFound)),
        }
    }

    /// Redeem an invite
    ///
    /// Unconditional and monotonic: the caller is expected to have just
    /// validated the code, and redeeming twice leaves the invite used. There
    /// is a known race window between validate and `mark_used` for two
    /// simultaneous sign-ups with the same code.
    ///
    /// # Errors
    ///
    /// Returns an error if the invite does not exist or the update fails.
    pub async fn mark_used(&self, invite_id: &str) -> AppResult<()> {
        self.remote.database()?.mark_invite_used(invite_id).await
    }

    /// List invites for one course, newest first (admin only)
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin or the query fails.
    pub async fn list_by_course(
        &self,
        issuer_email: &str,
        course_id: &str,
    ) -> AppResult<Vec<InviteCode>> {
        permissions::require_admin(&self.config, issuer_email)?;
        self.remote
            .database()?
            .list_invites_for_course(course_id)
            .await
    }

    /// List every invite, newest first (admin only)
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin or the query fails.
    pub async fn list_all(&self, issuer_email: &str) -> AppResult<Vec<InviteCode>> {
        permissions::require_admin(&self.config, issuer_email)?;
        self.remote.database()?.list_invites().await
    }

    /// Revoke an invite outright (admin only)
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not an admin, the invite does not
    /// exist, or the delete fails.
    pub async fn delete(&self, issuer_email: &str, invite_id: &str) -> AppResult<()> {
        permissions::require_admin(&self.config, issuer_email)?;
        self.remote.database()?.delete_invite(invite_id).await?;
        info!(invite_id, "Deleted invite code");
        Ok(())
    }

    /// Draw a 6-character code from the 36-symbol alphabet
    ///
    /// Bytes come from the OS random source and are reduced by modulo into the
    /// alphabet. The slight bias this introduces is acceptable: the code is a
    /// shared secret between an admin and one student, not a security
    /// boundary.
    fn generate_code() -> String {
        let mut bytes = [0u8; invite::CODE_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        bytes
            .iter()
            .map(|b| char::from(invite::CODE_ALPHABET[usize::from(*b) % invite::CODE_ALPHABET.len()]))
            .collect()
    }
}
