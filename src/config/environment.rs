// ABOUTME: Environment-variable-backed runtime configuration with sensible defaults
// ABOUTME: Absent DATABASE_URL switches the whole app into local-only mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use std::env;
use std::path::PathBuf;

use crate::constants::{env_vars, session};
use crate::errors::{AppError, AppResult};

/// Runtime configuration assembled from environment variables
///
/// `database_url` is deliberately optional: a deployment without it runs in
/// local-only mode where profiles live purely in the on-device cache and the
/// invite, course, and auth surfaces report missing configuration instead of
/// failing on connect.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Remote document store URL (`sqlite:...`); `None` disables remote features
    pub database_url: Option<String>,
    /// Override for the local cache directory
    pub data_dir: Option<PathBuf>,
    /// Admin allow-list, lowercased at load time
    pub admin_emails: Vec<String>,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            data_dir: None,
            admin_emails: Vec::new(),
            session_ttl_hours: session::DEFAULT_TTL_HOURS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `SALESGEM_SESSION_HOURS` is set but is not a
    /// positive integer.
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var(env_vars::DATABASE_URL)
            .ok()
            .filter(|url| !url.trim().is_empty());

        let data_dir = env::var(env_vars::DATA_DIR)
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let admin_emails = env::var(env_vars::ADMIN_EMAILS)
            .map(|raw| Self::parse_admin_list(&raw))
            .unwrap_or_default();

        let session_ttl_hours = match env::var(env_vars::SESSION_HOURS) {
            Ok(raw) => Self::parse_session_hours(&raw)?,
            Err(_) => session::DEFAULT_TTL_HOURS,
        };

        Ok(Self {
            database_url,
            data_dir,
            admin_emails,
            session_ttl_hours,
        })
    }

    /// Split a comma-separated allow-list, lowercasing and dropping blanks
    #[must_use]
    pub fn parse_admin_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect()
    }

    fn parse_session_hours(raw: &str) -> AppResult<i64> {
        let hours: i64 = raw.trim().parse().map_err(|_| {
            AppError::config(format!(
                "{} must be a positive integer, got {raw:?}",
                env_vars::SESSION_HOURS
            ))
        })?;
        if hours <= 0 {
            return Err(AppError::config(format!(
                "{} must be positive, got {hours}",
                env_vars::SESSION_HOURS
            )));
        }
        Ok(hours)
    }
}
