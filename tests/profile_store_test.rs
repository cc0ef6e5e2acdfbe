// ABOUTME: Integration tests for profile persistence across the local cache and remote store
// ABOUTME: Covers local-only mode, remote-first reads, cache fallback, and the write-through mirror
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Integration tests for the profile store:
//! 1. Without a session the local cache is the only store
//! 2. With a session the remote store wins, the cache absorbs gaps and failures
//! 3. Saves mirror to the cache even when the remote write fails

mod common;

use salesgem::database::RemoteStore;
use salesgem::errors::ErrorCode;
use salesgem::models::{Profile, User};
use salesgem::profile_store::ProfileStore;
use uuid::Uuid;

async fn create_test_user(store: &RemoteStore) -> anyhow::Result<Uuid> {
    let user = User::new(
        "seller@example.com".to_owned(),
        "not-a-real-hash".to_owned(),
        Some("Seller".to_owned()),
    );
    let id = store.database()?.create_user(&user).await?;
    Ok(id)
}

// ============================================================================
// Local-only mode (no session)
// ============================================================================

#[tokio::test]
async fn test_local_round_trip() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let store = ProfileStore::new(RemoteStore::Unconfigured, cache);

    let profile = common::sample_profile();
    store
        .save(None, &profile)
        .await
        .expect("Local save should succeed");

    let loaded = store.load(None).await;
    assert_eq!(loaded, profile, "Cache round-trips the full document");
}

#[tokio::test]
async fn test_fresh_cache_loads_default() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let store = ProfileStore::new(RemoteStore::Unconfigured, cache);

    let loaded = store.load(None).await;
    assert_eq!(loaded, Profile::default(), "Nothing cached means empty profile");
}

#[tokio::test]
async fn test_corrupt_cache_falls_back_to_default() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let path = cache.dir().join("profile.json");
    tokio::fs::write(&path, "{ not json")
        .await
        .expect("Writing garbage should succeed");

    let store = ProfileStore::new(RemoteStore::Unconfigured, cache);
    let loaded = store.load(None).await;
    assert_eq!(loaded, Profile::default(), "Corrupt cache reads as absent");
}

#[tokio::test]
async fn test_exists_requires_name_and_industry() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let store = ProfileStore::new(RemoteStore::Unconfigured, cache);

    assert!(!store.exists(None).await, "Empty profile does not exist");

    let name_only = Profile {
        name: "Hanako Sato".to_owned(),
        ..Profile::default()
    };
    store
        .save(None, &name_only)
        .await
        .expect("Save should succeed");
    assert!(
        !store.exists(None).await,
        "Name without industry is still incomplete"
    );

    let complete = Profile {
        industry: "SaaS".to_owned(),
        ..name_only
    };
    store
        .save(None, &complete)
        .await
        .expect("Save should succeed");
    assert!(store.exists(None).await, "Name plus industry is enough");
}

// ============================================================================
// Signed-in mode (remote authoritative)
// ============================================================================

#[tokio::test]
async fn test_remote_round_trip_mirrors_cache() {
    let remote = common::create_test_store().await.expect("Store setup failed");
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let user_id = create_test_user(&remote).await.expect("User setup failed");

    let store = ProfileStore::new(remote, cache.clone());
    let profile = common::sample_profile();
    store
        .save(Some(user_id), &profile)
        .await
        .expect("Remote save should succeed");

    let loaded = store.load(Some(user_id)).await;
    assert_eq!(loaded, profile, "Remote round-trips the full document");

    let mirrored = cache
        .load_profile()
        .await
        .expect("Cache read should succeed");
    assert_eq!(
        mirrored,
        Some(profile),
        "Every save writes through to the local cache"
    );
}

#[tokio::test]
async fn test_load_prefers_remote_over_cache() {
    let remote = common::create_test_store().await.expect("Store setup failed");
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let user_id = create_test_user(&remote).await.expect("User setup failed");

    let remote_profile = common::sample_profile();
    remote
        .database()
        .expect("Store is configured")
        .upsert_profile(user_id, &remote_profile)
        .await
        .expect("Remote write should succeed");

    let stale = Profile {
        name: "Stale Local Copy".to_owned(),
        ..common::sample_profile()
    };
    cache
        .store_profile(&stale)
        .await
        .expect("Cache write should succeed");

    let store = ProfileStore::new(remote, cache);
    let loaded = store.load(Some(user_id)).await;
    assert_eq!(
        loaded, remote_profile,
        "With a session the remote document wins"
    );
}

#[tokio::test]
async fn test_remote_without_document_falls_back_to_cache() {
    let remote = common::create_test_store().await.expect("Store setup failed");
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let user_id = create_test_user(&remote).await.expect("User setup failed");

    let cached = common::sample_profile();
    cache
        .store_profile(&cached)
        .await
        .expect("Cache write should succeed");

    let store = ProfileStore::new(remote, cache);
    let loaded = store.load(Some(user_id)).await;
    assert_eq!(
        loaded, cached,
        "An account with no document yet falls back to the cache"
    );
}

#[tokio::test]
async fn test_save_without_remote_keeps_local_mirror() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let store = ProfileStore::new(RemoteStore::Unconfigured, cache.clone());

    let profile = common::sample_profile();
    let err = store
        .save(Some(Uuid::new_v4()), &profile)
        .await
        .expect_err("Remote save must fail without a store");
    assert_eq!(err.code, ErrorCode::ConfigMissing);

    let mirrored = cache
        .load_profile()
        .await
        .expect("Cache read should succeed");
    assert_eq!(
        mirrored,
        Some(profile),
        "Edits survive locally even when the remote write fails"
    );
}

#[tokio::test]
async fn test_remote_load_failure_falls_back_to_cache() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    let cached = common::sample_profile();
    cache
        .store_profile(&cached)
        .await
        .expect("Cache write should succeed");

    let store = ProfileStore::new(RemoteStore::Unconfigured, cache);
    let loaded = store.load(Some(Uuid::new_v4())).await;
    assert_eq!(
        loaded, cached,
        "A failing remote read degrades to the cached document"
    );
}
