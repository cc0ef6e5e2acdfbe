// ABOUTME: Configured-vs-absent wrapper around the remote document store
// ABOUTME: Callers branch on RemoteStore instead of checking for a null connection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult};

/// Remote store handle that is explicit about whether a backend is configured
///
/// Deployments without a `DATABASE_URL` run local-only: profile edits stay in
/// the on-device cache and every remote operation reports missing
/// configuration instead of panicking on an absent connection.
#[derive(Clone)]
pub enum RemoteStore {
    /// Remote document store is configured and reachable
    Connected(Database),
    /// No remote store configured; local-only mode
    Unconfigured,
}

impl RemoteStore {
    /// Connect to the remote store if a URL is configured
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is present but the connection or migration
    /// fails. An absent URL is not an error; it yields `Unconfigured`.
    pub async fn connect(database_url: Option<&str>) -> AppResult<Self> {
        match database_url {
            Some(url) => {
                let database = Database::new(url).await?;
                info!("Connected to remote document store");
                Ok(Self::Connected(database))
            }
            None => {
                info!("No remote store configured; running local-only");
                Ok(Self::Unconfigured)
            }
        }
    }

    /// Get a descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Connected(_) => "SQLite document store",
            Self::Unconfigured => "local-only (no remote store)",
        }
    }

    /// Whether a remote backend is configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Get the underlying database, or a missing-configuration error
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when running local-only.
    pub fn database(&self) -> AppResult<&Database> {
        match self {
            Self::Connected(database) => Ok(database),
            Self::Unconfigured => Err(AppError::config(
                "Remote store is not configured; set DATABASE_URL to enable this operation",
            )),
        }
    }
}
