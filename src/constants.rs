// ABOUTME: Central constants for invite codes, sessions, cache file names, and environment keys
// ABOUTME: Grouped in nested modules so call sites read as constants::invite::CODE_LENGTH
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

/// Invite code generation parameters
pub mod invite {
    /// Characters an invite code is drawn from. Uppercase plus digits keeps
    /// codes easy to read aloud and case-insensitive to type.
    pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Length of a generated invite code
    pub const CODE_LENGTH: usize = 6;
}

/// Session tokens and the sign-in watchdog
pub mod session {
    /// Key under which the signing secret lives in `system_secrets`
    pub const SECRET_TYPE: &str = "session_jwt_secret";

    /// Length of the generated signing secret, in alphanumeric characters
    pub const SECRET_LENGTH: usize = 64;

    /// Default session lifetime in hours
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// How long session restoration may take before the app proceeds
    /// unauthenticated
    pub const OBSERVE_TIMEOUT_SECS: u64 = 5;
}

/// Account limits
pub mod limits {
    /// Minimum password length accepted at sign-up
    pub const MIN_PASSWORD_LENGTH: usize = 8;
}

/// Local cache layout under the data directory
pub mod cache {
    /// Directory name under the platform data dir
    pub const APP_DIR: &str = "salesgem";

    /// Cached profile document
    pub const PROFILE_FILE: &str = "profile.json";

    /// Cached session token
    pub const SESSION_FILE: &str = "session.token";
}

/// Environment variable names read by `ServerConfig::from_env`
pub mod env_vars {
    /// Remote document store URL; absent means local-only mode
    pub const DATABASE_URL: &str = "DATABASE_URL";

    /// Override for the local cache directory
    pub const DATA_DIR: &str = "SALESGEM_DATA_DIR";

    /// Comma-separated admin email allow-list
    pub const ADMIN_EMAILS: &str = "SALESGEM_ADMIN_EMAILS";

    /// Session lifetime override, in hours
    pub const SESSION_HOURS: &str = "SALESGEM_SESSION_HOURS";
}
