// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory store, temp-dir cache, and sample profile builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(dead_code)]

//! Shared test utilities for `salesgem`
//!
//! Common setup functions to reduce duplication across integration tests.

use std::env;
use std::sync::Once;

use anyhow::Result;
use tempfile::TempDir;

use salesgem::config::environment::ServerConfig;
use salesgem::database::{Database, RemoteStore};
use salesgem::local_cache::LocalCache;
use salesgem::models::Profile;

/// The one allow-listed admin in [`test_config`]
pub const ADMIN_EMAIL: &str = "admin@example.com";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Config with one allow-listed admin and defaults everywhere else
pub fn test_config() -> ServerConfig {
    ServerConfig {
        admin_emails: vec![ADMIN_EMAIL.to_owned()],
        ..ServerConfig::default()
    }
}

/// Connected in-memory remote store with migrations applied
pub async fn create_test_store() -> Result<RemoteStore> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(RemoteStore::Connected(database))
}

/// Local cache rooted in a fresh temp dir
///
/// The `TempDir` must be kept alive for as long as the cache is used.
pub fn create_test_cache() -> Result<(TempDir, LocalCache)> {
    init_test_logging();
    let temp_dir = tempfile::tempdir()?;
    let cache = LocalCache::with_dir(temp_dir.path().to_path_buf());
    Ok((temp_dir, cache))
}

/// A fully filled-in profile for generation and persistence tests
pub fn sample_profile() -> Profile {
    Profile {
        name: "Hanako Sato".to_owned(),
        industry: "SaaS".to_owned(),
        job_title: "Account Executive".to_owned(),
        years_experience: "5-10年".to_owned(),
        product_service: "Contract review automation".to_owned(),
        advantage: "Cuts review time by 80%".to_owned(),
        price_range: "50,000-200,000 JPY/month".to_owned(),
        ideal_customer: "Legal teams at mid-size companies".to_owned(),
        pain_points: ["Slow contract turnaround", "Manual review errors"]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        common_questions: [
            "How long does onboarding take?".to_owned(),
            "Does it support English contracts?".to_owned(),
            "Is our data used for training?".to_owned(),
        ],
        tone: "Professional but warm".to_owned(),
        catchphrases: "Review less, close more".to_owned(),
        avoid_words: "cheap, revolutionary".to_owned(),
        platforms: ["LinkedIn", "Email"].into_iter().map(str::to_owned).collect(),
        content_length: "Medium (300-500 words)".to_owned(),
        call_to_action: "Book a 30-minute demo".to_owned(),
        ..Profile::default()
    }
}
