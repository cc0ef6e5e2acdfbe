// ABOUTME: Main library entry point for the Salesgem sales-enablement toolkit
// ABOUTME: Generates AI prompt artifacts from seller profiles behind invite-gated onboarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

#![deny(unsafe_code)]

//! # Salesgem
//!
//! A sales-enablement toolkit that turns a seller's profile into reusable AI
//! prompt artifacts ("gems"), with invite-gated onboarding, a course registry
//! for workshop cohorts, and dual remote/local persistence.
//!
//! ## Features
//!
//! - **Gem generation**: Five prompt artifacts built deterministically from a
//!   sales profile, with blanks rendered as explicit placeholders
//! - **Framework tiers**: The copywriting framework embedded in each gem is
//!   selected from the seller's stated experience
//! - **Invite codes**: Single-use codes bound to an email address gate
//!   account registration
//! - **Course registry**: Named courses with bulk roster import that issues
//!   invites and keeps student counts current
//! - **Dual persistence**: A remote SQLite store when configured, with an
//!   on-device cache that keeps profile editing working offline
//!
//! ## Quick Start
//!
//! 1. Set `DATABASE_URL` to enable the remote store (optional; profile
//!    editing and gem generation work without it)
//! 2. Manage invites, courses, and accounts with the `salesgem-cli` binary
//! 3. Generate gems with `salesgem-cli gems`
//!
//! ## Architecture
//!
//! The crate follows a modular architecture:
//! - **Models**: Accounts, sales profiles, invite codes, and courses
//! - **Gems**: Pure profile-to-artifact generation
//! - **Database**: SQLite-backed remote store with migrations
//! - **Local cache**: Profile and session files under the platform data dir
//! - **Auth**: Email/password accounts with cached bearer sessions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use salesgem::config::environment::ServerConfig;
//! use salesgem::database::RemoteStore;
//! use salesgem::errors::AppResult;
//! use salesgem::local_cache::LocalCache;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     let remote = RemoteStore::connect(config.database_url.as_deref()).await?;
//!     let cache = LocalCache::new(&config)?;
//!
//!     println!(
//!         "Salesgem configured: store={}, cache={}",
//!         remote.backend_info(),
//!         cache.dir().display()
//!     );
//!
//!     Ok(())
//! }
//! ```

/// Common data models for accounts, profiles, invites, and courses
pub mod models;

/// Configuration management from environment variables
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Prompt artifact ("gem") generation from a sales profile
pub mod gems;

/// Sales profile persistence across the remote store and local cache
pub mod profile_store;

/// Invite code issuance, validation, and consumption
pub mod invites;

/// Course registry keyed by display name
pub mod courses;

/// Bulk invite import from tabular rosters
pub mod import;

/// Remote store access backed by SQLite
pub mod database;

/// On-device cache for the profile document and session token
pub mod local_cache;

/// Authentication and session management
pub mod auth;

/// Role-based permission checks for administrative operations
pub mod permissions;

/// Unified error handling system with standard error codes
pub mod errors;
