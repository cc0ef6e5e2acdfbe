// ABOUTME: Email/password auth gate: sign-up (invite-gated), sign-in, sign-out, session restore
// ABOUTME: Sessions are HS256 JWTs signed with a store-generated secret and cached on device
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::constants::{limits, session};
use crate::database::RemoteStore;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::invites::{InviteService, InviteValidation};
use crate::local_cache::LocalCache;
use crate::models::User;

/// Authentication failure codes with a fixed human-message table
///
/// The code strings are part of the external contract (clients may log or
/// branch on them); the messages are what end users see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCode {
    /// Email already registered
    EmailInUse,
    /// Email failed format validation
    InvalidEmail,
    /// Email/password sign-in disabled for this deployment
    OperationNotAllowed,
    /// Password below the minimum strength
    WeakPassword,
    /// Account exists but is disabled
    UserDisabled,
    /// No account for this email
    UserNotFound,
    /// Password did not match
    WrongPassword,
    /// Credential rejected or expired
    InvalidCredential,
    /// Rate limited by the identity layer
    TooManyRequests,
    /// Transport failure during an auth call
    NetworkFailure,
}

impl AuthCode {
    /// Stable code string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmailInUse => "email-in-use",
            Self::InvalidEmail => "invalid-email",
            Self::OperationNotAllowed => "not-allowed",
            Self::WeakPassword => "weak-password",
            Self::UserDisabled => "disabled",
            Self::UserNotFound => "not-found",
            Self::WrongPassword => "wrong-password",
            Self::InvalidCredential => "invalid-credential",
            Self::TooManyRequests => "too-many-requests",
            Self::NetworkFailure => "network-failure",
        }
    }

    /// Parse a code string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email-in-use" => Some(Self::EmailInUse),
            "invalid-email" => Some(Self::InvalidEmail),
            "not-allowed" => Some(Self::OperationNotAllowed),
            "weak-password" => Some(Self::WeakPassword),
            "disabled" => Some(Self::UserDisabled),
            "not-found" => Some(Self::UserNotFound),
            "wrong-password" => Some(Self::WrongPassword),
            "invalid-credential" => Some(Self::InvalidCredential),
            "too-many-requests" => Some(Self::TooManyRequests),
            "network-failure" => Some(Self::NetworkFailure),
            _ => None,
        }
    }

    /// Fixed message shown to end users for this code
    #[must_use]
    pub const fn human_message(&self) -> &'static str {
        match self {
            Self::EmailInUse => "This email address is already registered.",
            Self::InvalidEmail => "The email address is not valid.",
            Self::OperationNotAllowed => "Email and password sign-in is disabled here.",
            Self::WeakPassword => "Password is too weak. Use at least 8 characters.",
            Self::UserDisabled => "This account has been disabled.",
            Self::UserNotFound => "No account found for this email address.",
            Self::WrongPassword => "Incorrect password.",
            Self::InvalidCredential => "The credentials are invalid or have expired.",
            Self::TooManyRequests => "Too many attempts. Wait a moment and try again.",
            Self::NetworkFailure => "A network error occurred. Check your connection and try again.",
        }
    }

    const fn error_code(self) -> ErrorCode {
        match self {
            Self::EmailInUse => ErrorCode::ResourceAlreadyExists,
            Self::InvalidEmail | Self::WeakPassword => ErrorCode::InvalidInput,
            Self::NetworkFailure => ErrorCode::NetworkError,
            Self::OperationNotAllowed
            | Self::UserDisabled
            | Self::UserNotFound
            | Self::WrongPassword
            | Self::InvalidCredential
            | Self::TooManyRequests => ErrorCode::AuthInvalid,
        }
    }
}

/// Look up the human message for a raw code string, falling back to the raw
/// code itself for anything outside the table
#[must_use]
pub fn human_message_for(raw_code: &str) -> String {
    AuthCode::parse(raw_code).map_or_else(|| raw_code.to_owned(), |code| code.human_message().to_owned())
}

/// Build the error for an authentication failure code
#[must_use]
pub fn auth_failure(code: AuthCode) -> AppError {
    AppError::new(code.error_code(), code.human_message())
}

/// Claims carried in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    /// Account email at issue time
    pub email: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// The authenticated identity surfaced to the rest of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Account id
    pub user_id: Uuid,
    /// Account email, lowercase
    pub email: String,
}

/// Issues and verifies session tokens with a shared HS256 secret
pub struct SessionManager {
    secret: String,
    ttl_hours: i64,
}

impl SessionManager {
    /// Create a manager around a signing secret
    #[must_use]
    pub const fn new(secret: String, ttl_hours: i64) -> Self {
        Self { secret, ttl_hours }
    }

    /// Issue a session token for an account
    ///
    /// # Errors
    ///
    /// Returns an error if token signing fails.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(self.ttl_hours)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Verify a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired` for an expired token, `AuthInvalid` for any other
    /// rejection.
    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::auth_expired("Session has expired"),
            _ => AppError::auth_invalid(format!("Session token rejected: {e}")),
        })
    }
}

/// Sign-up request: account details plus the invite gating it
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    /// Display name (may be blank)
    pub name: String,
    /// Email address
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Invite code issued to this email
    pub invite_code: String,
}

/// Sign-in request
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Email/password authentication over the remote store
///
/// Sessions are persisted in the local cache so a restart can restore them
/// without re-entering credentials.
#[derive(Clone)]
pub struct AuthGate {
    remote: RemoteStore,
    cache: LocalCache,
    config: ServerConfig,
    invites: InviteService,
}

impl AuthGate {
    /// Create the gate
    #[must_use]
    pub fn new(remote: RemoteStore, cache: LocalCache, config: ServerConfig) -> Self {
        let invites = InviteService::new(remote.clone(), config.clone());
        Self {
            remote,
            cache,
            config,
            invites,
        }
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= limits::MIN_PASSWORD_LENGTH
    }

    /// Register a new account, consuming an invite code
    ///
    /// The invite is validated before the account is created and marked used
    /// right after, so an invite is only consumed by a sign-up that succeeded.
    /// Two simultaneous sign-ups with the same code can race between those two
    /// steps; the code ends up used either way.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (email format, password strength,
    /// invite code), the email is already registered, the remote store is not
    /// configured, or a store operation fails.
    #[tracing::instrument(skip(self, request), fields(route = "sign_up"))]
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<SessionInfo> {
        info!("Sign-up attempt");

        let email = request.email.trim().to_lowercase();
        if !Self::is_valid_email(&email) {
            return Err(auth_failure(AuthCode::InvalidEmail));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(auth_failure(AuthCode::WeakPassword));
        }

        let validation = self.invites.validate(&request.invite_code, &email).await?;
        let invite = match validation {
            InviteValidation::Valid(invite) => invite,
            InviteValidation::Invalid(rejection) => {
                return Err(AppError::invalid_input(rejection.human_message()));
            }
        };

        let db = self.remote.database()?;
        if db.get_user_by_email(&email).await?.is_some() {
            return Err(auth_failure(AuthCode::EmailInUse));
        }

        // Hash on a blocking thread; bcrypt is deliberately slow
        let password = request.password.clone();
        let password_hash =
            task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let display_name = Some(request.name.trim().to_owned()).filter(|name| !name.is_empty());
        let user = User::new(email, password_hash, display_name);
        db.create_user(&user).await?;

        self.invites.mark_used(&invite.id).await?;

        let token = self.session_manager().await?.issue(&user)?;
        self.cache.store_session(&token).await?;

        info!(user_id = %user.id, invite_id = %invite.id, "Account created");
        Ok(SessionInfo {
            user_id: user.id,
            email: user.email,
        })
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns an error with the matching [`AuthCode`] message if the account
    /// is missing or the password wrong, or a store error if a remote
    /// operation fails.
    #[tracing::instrument(skip(self, request), fields(route = "sign_in"))]
    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<SessionInfo> {
        debug!("Sign-in attempt");

        let db = self.remote.database()?;
        let Some(user) = db.get_user_by_email(&request.email).await? else {
            return Err(auth_failure(AuthCode::UserNotFound));
        };

        let password = request.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid = task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|_| auth_failure(AuthCode::InvalidCredential))?;

        if !is_valid {
            return Err(auth_failure(AuthCode::WrongPassword));
        }

        db.update_last_active(user.id).await?;

        let token = self.session_manager().await?.issue(&user)?;
        self.cache.store_session(&token).await?;

        info!(user_id = %user.id, "Signed in");
        Ok(SessionInfo {
            user_id: user.id,
            email: user.email,
        })
    }

    /// Sign out: forget the persisted session
    ///
    /// # Errors
    ///
    /// Returns an error if the cached token cannot be removed.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.cache.clear_session().await?;
        info!("Signed out");
        Ok(())
    }

    /// Restore the persisted session, if any, under a watchdog
    ///
    /// Never fails: any rejection, store failure, or a restore that takes
    /// longer than the watchdog resolves to "unauthenticated" so the app is
    /// never stuck waiting on auth.
    pub async fn observe_session(&self) -> Option<SessionInfo> {
        let watchdog = Duration::from_secs(session::OBSERVE_TIMEOUT_SECS);
        match timeout(watchdog, self.restore_session()).await {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => {
                warn!(error = %e, "Session restore failed; proceeding unauthenticated");
                None
            }
            Err(_) => {
                warn!(
                    timeout_secs = session::OBSERVE_TIMEOUT_SECS,
                    "Session restore timed out; proceeding unauthenticated"
                );
                None
            }
        }
    }

    async fn restore_session(&self) -> AppResult<Option<SessionInfo>> {
        let Some(token) = self.cache.load_session().await? else {
            return Ok(None);
        };

        if !self.remote.is_configured() {
            debug!("Session token present but no remote store; ignoring");
            return Ok(None);
        }

        let claims = match self.session_manager().await?.verify(&token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Persisted session token rejected; clearing");
                self.cache.clear_session().await?;
                return Ok(None);
            }
        };

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::internal(format!("Malformed subject in session token: {e}")))?;

        let db = self.remote.database()?;
        let Some(user) = db.get_user(user_id).await? else {
            debug!(%user_id, "Session references a deleted account; clearing");
            self.cache.clear_session().await?;
            return Ok(None);
        };

        db.update_last_active(user.id).await?;

        Ok(Some(SessionInfo {
            user_id: user.id,
            email: user.email,
        }))
    }

    async fn session_manager(&self) -> AppResult<SessionManager> {
        let secret = self
            .remote
            .database()?
            .get_or_create_system_secret(session::SECRET_TYPE)
            .await?;
        Ok(SessionManager::new(secret, self.config.session_ttl_hours))
    }
}
