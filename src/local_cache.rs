// ABOUTME: On-device cache for the profile document and session token
// ABOUTME: Plain files under the platform data dir; corrupt entries are treated as absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::config::ServerConfig;
use crate::constants::cache;
use crate::errors::{AppError, AppResult};
use crate::models::Profile;

/// Local cache rooted at a single directory
///
/// The cache mirrors whatever the remote store last confirmed, plus any edits
/// made while offline. Losing it is an inconvenience, never data corruption,
/// so reads degrade to "nothing cached" instead of failing hard.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Open the cache, resolving and creating its directory
    ///
    /// Resolution order: `SALESGEM_DATA_DIR` override, platform data dir,
    /// current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn new(config: &ServerConfig) -> AppResult<Self> {
        let dir = config.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| env::current_dir().unwrap_or_default())
                .join(cache::APP_DIR)
        });

        std::fs::create_dir_all(&dir).map_err(|e| {
            AppError::storage(format!(
                "Failed to create cache directory {}: {e}",
                dir.display()
            ))
        })?;

        Ok(Self { dir })
    }

    /// Open the cache at an explicit directory (used by tests)
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory the cache lives in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the cached profile document, if present and readable
    ///
    /// A corrupt cache entry is logged and reported as absent.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures other than the file being absent.
    pub async fn load_profile(&self) -> AppResult<Option<Profile>> {
        let path = self.dir.join(cache::PROFILE_FILE);
        match fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(profile) => Ok(Some(profile)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cached profile is corrupt; ignoring");
                    Ok(None)
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read cached profile: {e}"
            ))),
        }
    }

    /// Write the profile document to the cache
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn store_profile(&self, profile: &Profile) -> AppResult<()> {
        let path = self.dir.join(cache::PROFILE_FILE);
        let raw = serde_json::to_string_pretty(profile)?;
        fs::write(&path, raw).await.map_err(|e| {
            AppError::storage(format!("Failed to write cached profile: {e}"))
        })?;
        Ok(())
    }

    /// Remove the cached profile document
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures other than the file being absent.
    pub async fn clear_profile(&self) -> AppResult<()> {
        Self::remove_if_present(&self.dir.join(cache::PROFILE_FILE)).await
    }

    /// Load the persisted session token, if any
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures other than the file being absent.
    pub async fn load_session(&self) -> AppResult<Option<String>> {
        let path = self.dir.join(cache::SESSION_FILE);
        match fs::read_to_string(&path).await {
            Ok(token) => {
                let token = token.trim().to_owned();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read session token: {e}"
            ))),
        }
    }

    /// Persist the session token across restarts
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn store_session(&self, token: &str) -> AppResult<()> {
        let path = self.dir.join(cache::SESSION_FILE);
        fs::write(&path, token).await.map_err(|e| {
            AppError::storage(format!("Failed to write session token: {e}"))
        })?;
        Ok(())
    }

    /// Forget the persisted session token (sign-out)
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures other than the file being absent.
    pub async fn clear_session(&self) -> AppResult<()> {
        Self::remove_if_present(&self.dir.join(cache::SESSION_FILE)).await
    }

    async fn remove_if_present(path: &Path) -> AppResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}
