// ABOUTME: Read-through/write-through profile persistence across local cache and remote store
// ABOUTME: Remote is authoritative when a session exists; the cache absorbs remote failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use tracing::warn;
use uuid::Uuid;

use crate::database::RemoteStore;
use crate::errors::AppResult;
use crate::local_cache::LocalCache;
use crate::models::Profile;

/// Profile persistence across the two stores
///
/// The two stores are not kept transactionally consistent. A remote write can
/// fail after the local mirror succeeded and the stores diverge until the next
/// successful save; last writer wins with no version check. The data is
/// single-user and re-editable, so eventual agreement is enough.
#[derive(Clone)]
pub struct ProfileStore {
    remote: RemoteStore,
    cache: LocalCache,
}

impl ProfileStore {
    /// Create the store
    #[must_use]
    pub const fn new(remote: RemoteStore, cache: LocalCache) -> Self {
        Self { remote, cache }
    }

    /// Load the current profile, never failing
    ///
    /// With a session: read remote; any remote failure (or an account with no
    /// document yet) falls back to the local cache. Without a session: local
    /// cache only. When both sources come up empty the default profile is
    /// returned, so callers never see "no profile".
    pub async fn load(&self, user_id: Option<Uuid>) -> Profile {
        if let Some(user_id) = user_id {
            match self.load_remote(user_id).await {
                Ok(Some(profile)) => return profile,
                Ok(None) => {}
                Err(e) => {
                    warn!(%user_id, error = %e, "Remote profile load failed; using local cache");
                }
            }
        }

        match self.cache.load_profile().await {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(e) => {
                warn!(error = %e, "Local profile load failed; using empty profile");
                Profile::default()
            }
        }
    }

    /// Save the profile
    ///
    /// With a session: write remote, then mirror to the local cache regardless
    /// of the remote outcome so a failed remote write never loses edits; the
    /// remote error, if any, is still returned. Without a session: local cache
    /// only.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the remote write fails (edits are still
    /// cached locally), or a storage error when the local-only write fails.
    pub async fn save(&self, user_id: Option<Uuid>, profile: &Profile) -> AppResult<()> {
        let remote_outcome = match user_id {
            Some(user_id) => self.save_remote(user_id, profile).await,
            None => Ok(()),
        };

        if let Err(e) = self.cache.store_profile(profile).await {
            if remote_outcome.is_ok() {
                return Err(e);
            }
            warn!(error = %e, "Local profile mirror failed after remote failure");
        }

        remote_outcome
    }

    /// Whether a usable profile exists: both name and industry are filled in
    ///
    /// This single heuristic gates onboarding nudges; a profile with either
    /// field blank counts as absent no matter what else is filled.
    pub async fn exists(&self, user_id: Option<Uuid>) -> bool {
        self.load(user_id).await.is_complete()
    }

    async fn load_remote(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        self.remote.database()?.get_profile(user_id).await
    }

    async fn save_remote(&self, user_id: Uuid, profile: &Profile) -> AppResult<()> {
        self.remote.database()?.upsert_profile(user_id, profile).await
    }
}
