// ABOUTME: Unified error type with stable machine-readable codes for every library surface
// ABOUTME: Defines ErrorCode, AppError, constructor helpers, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use thiserror::Error;

/// Stable error codes grouped by concern.
///
/// Codes are part of the public contract: callers branch on them (the bulk
/// importer skips `ResourceAlreadyExists`, the CLI picks a retry message for
/// transient codes) so variants are never repurposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No session present where one is required
    AuthRequired,
    /// Credentials or session token rejected
    AuthInvalid,
    /// Session token expired
    AuthExpired,
    /// Caller authenticated but not allowed to perform the operation
    PermissionDenied,
    /// Request payload failed validation
    InvalidInput,
    /// A required field was absent or empty
    MissingRequiredField,
    /// A field was present but malformed
    InvalidFormat,
    /// Referenced resource does not exist
    ResourceNotFound,
    /// Resource with the same identity already exists
    ResourceAlreadyExists,
    /// Required configuration (remote store, data dir) is absent
    ConfigMissing,
    /// Remote document store operation failed
    DatabaseError,
    /// Local cache read or write failed
    StorageError,
    /// Transport-level failure talking to the remote store
    NetworkError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Stable string form used in logs and CLI output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthRequired => "auth_required",
            Self::AuthInvalid => "auth_invalid",
            Self::AuthExpired => "auth_expired",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidInput => "invalid_input",
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidFormat => "invalid_format",
            Self::ResourceNotFound => "resource_not_found",
            Self::ResourceAlreadyExists => "resource_already_exists",
            Self::ConfigMissing => "config_missing",
            Self::DatabaseError => "database_error",
            Self::StorageError => "storage_error",
            Self::NetworkError => "network_error",
            Self::InternalError => "internal_error",
        }
    }

    /// True for codes caused by infrastructure rather than the caller's input.
    /// These are safe to retry and are collapsed to a generic message in user
    /// facing output.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError | Self::StorageError | Self::NetworkError | Self::InternalError
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error carrying a stable code and a human-readable message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable code callers branch on
    pub code: ErrorCode,
    /// Human-readable detail, safe for logs
    pub message: String,
}

impl AppError {
    /// Create an error with an explicit code
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Remote document store failure
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Local cache failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Transport failure talking to the remote store
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Unexpected internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Missing configuration (remote store URL, data directory)
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Invalid request payload
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field absent or empty
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {}", field.into()),
        )
    }

    /// Referenced resource does not exist
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Resource with the same identity already exists
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// No session present where one is required
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Credentials or session token rejected
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Session token expired
    pub fn auth_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthExpired, message)
    }

    /// Authenticated caller lacks permission for the operation
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Message suitable for end-user display. Transient infrastructure codes
    /// collapse to a generic retry prompt; everything else keeps its detail.
    #[must_use]
    pub fn user_message(&self) -> &str {
        if self.code.is_transient() {
            "Something went wrong. Please try again."
        } else {
            &self.message
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorCode::InvalidFormat, format!("JSON error: {e}"))
    }
}

impl From<uuid::Error> for AppError {
    fn from(e: uuid::Error) -> Self {
        Self::new(ErrorCode::InvalidFormat, format!("UUID error: {e}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(format!("I/O error: {e}"))
    }
}

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;
