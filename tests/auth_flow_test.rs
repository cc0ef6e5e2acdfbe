// ABOUTME: Integration tests for invite-gated sign-up, sign-in, sign-out, and session restore
// ABOUTME: Covers the auth failure-code table, token expiry, and the local-only degradation paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Integration tests for the auth gate:
//! 1. Sign-up consumes exactly one invite and starts a session
//! 2. Sign-in distinguishes missing accounts from wrong passwords
//! 3. Session restore degrades to unauthenticated instead of failing

mod common;

use salesgem::auth::{
    auth_failure, human_message_for, AuthCode, AuthGate, SessionManager, SignInRequest,
    SignUpRequest,
};
use salesgem::database::RemoteStore;
use salesgem::errors::ErrorCode;
use salesgem::invites::InviteService;
use salesgem::local_cache::LocalCache;
use salesgem::models::{InviteStatus, User};
use tempfile::TempDir;

const PASSWORD: &str = "correct-horse-1";

struct AuthTestSetup {
    _temp: TempDir,
    store: RemoteStore,
    cache: LocalCache,
    gate: AuthGate,
    invites: InviteService,
}

async fn setup() -> anyhow::Result<AuthTestSetup> {
    let store = common::create_test_store().await?;
    let (temp, cache) = common::create_test_cache()?;
    let config = common::test_config();
    let invites = InviteService::new(store.clone(), config.clone());
    let gate = AuthGate::new(store.clone(), cache.clone(), config);
    Ok(AuthTestSetup {
        _temp: temp,
        store,
        cache,
        gate,
        invites,
    })
}

async fn seed_invite(setup: &AuthTestSetup, email: &str) -> anyhow::Result<String> {
    let invite = setup
        .invites
        .create(common::ADMIN_EMAIL, "Taro Yamada", email, None)
        .await?;
    Ok(invite.code)
}

fn sign_up_request(email: &str, password: &str, code: &str) -> SignUpRequest {
    SignUpRequest {
        name: "Taro Yamada".to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        invite_code: code.to_owned(),
    }
}

fn sign_in_request(email: &str, password: &str) -> SignInRequest {
    SignInRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

// ============================================================================
// Sign-up
// ============================================================================

#[tokio::test]
async fn test_sign_up_consumes_invite_and_starts_session() {
    let setup = setup().await.expect("Setup failed");
    let code = seed_invite(&setup, "taro@example.com")
        .await
        .expect("Invite seeding failed");

    let session = setup
        .gate
        .sign_up(sign_up_request("  TARO@Example.com  ", PASSWORD, &code))
        .await
        .expect("Sign-up should succeed");
    assert_eq!(session.email, "taro@example.com", "Email is normalized");

    let invites = setup
        .invites
        .list_all(common::ADMIN_EMAIL)
        .await
        .expect("Listing should succeed");
    let consumed = invites
        .iter()
        .find(|invite| invite.code == code)
        .expect("Seeded invite should still be listed");
    assert_eq!(consumed.status, InviteStatus::Used);
    assert!(consumed.used_at.is_some(), "Redemption is timestamped");

    let restored = setup.gate.observe_session().await;
    assert_eq!(
        restored.map(|s| s.user_id),
        Some(session.user_id),
        "The new session is persisted and restorable"
    );
}

#[tokio::test]
async fn test_sign_up_without_invite_fails() {
    let setup = setup().await.expect("Setup failed");

    let err = setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, "AAAAAA"))
        .await
        .expect_err("Unknown codes must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(
        err.message.contains("Check the code"),
        "Message: {}",
        err.message
    );
}

#[tokio::test]
async fn test_sign_up_rejects_reused_invite() {
    let setup = setup().await.expect("Setup failed");
    let code = seed_invite(&setup, "taro@example.com")
        .await
        .expect("Invite seeding failed");

    setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, &code))
        .await
        .expect("First sign-up should succeed");

    // The invite check runs before the duplicate-account check, so the
    // consumed code is what gets reported.
    let err = setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, &code))
        .await
        .expect_err("A consumed code must be rejected");
    assert!(
        err.message.contains("already been used"),
        "Message: {}",
        err.message
    );
}

#[tokio::test]
async fn test_sign_up_rejects_registered_email() {
    let setup = setup().await.expect("Setup failed");
    let first = seed_invite(&setup, "taro@example.com")
        .await
        .expect("Invite seeding failed");
    setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, &first))
        .await
        .expect("First sign-up should succeed");

    // A fresh invite is allowed once the first is consumed, but the account
    // check still blocks the second registration.
    let second = seed_invite(&setup, "taro@example.com")
        .await
        .expect("Second invite should be issuable");
    let err = setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, &second))
        .await
        .expect_err("Duplicate registration must fail");
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.message, AuthCode::EmailInUse.human_message());
}

#[tokio::test]
async fn test_sign_up_rejects_weak_password() {
    let setup = setup().await.expect("Setup failed");

    let err = setup
        .gate
        .sign_up(sign_up_request("taro@example.com", "short", "AAAAAA"))
        .await
        .expect_err("Weak passwords must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, AuthCode::WeakPassword.human_message());
}

#[tokio::test]
async fn test_sign_up_rejects_malformed_email() {
    let setup = setup().await.expect("Setup failed");

    let err = setup
        .gate
        .sign_up(sign_up_request("not-an-email", PASSWORD, "AAAAAA"))
        .await
        .expect_err("Malformed emails must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, AuthCode::InvalidEmail.human_message());
}

// ============================================================================
// Sign-in and sign-out
// ============================================================================

#[tokio::test]
async fn test_sign_in_round_trip() {
    let setup = setup().await.expect("Setup failed");
    let code = seed_invite(&setup, "taro@example.com")
        .await
        .expect("Invite seeding failed");
    let created = setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, &code))
        .await
        .expect("Sign-up should succeed");

    setup.gate.sign_out().await.expect("Sign-out should succeed");
    assert!(
        setup.gate.observe_session().await.is_none(),
        "Sign-out forgets the session"
    );

    let session = setup
        .gate
        .sign_in(sign_in_request("Taro@Example.COM", PASSWORD))
        .await
        .expect("Sign-in should succeed");
    assert_eq!(session.user_id, created.user_id);
    assert_eq!(session.email, "taro@example.com");
}

#[tokio::test]
async fn test_sign_in_distinguishes_missing_account_from_wrong_password() {
    let setup = setup().await.expect("Setup failed");
    let code = seed_invite(&setup, "taro@example.com")
        .await
        .expect("Invite seeding failed");
    setup
        .gate
        .sign_up(sign_up_request("taro@example.com", PASSWORD, &code))
        .await
        .expect("Sign-up should succeed");

    let err = setup
        .gate
        .sign_in(sign_in_request("nobody@example.com", PASSWORD))
        .await
        .expect_err("Unknown accounts must fail");
    assert_eq!(err.code, ErrorCode::AuthInvalid);
    assert_eq!(err.message, AuthCode::UserNotFound.human_message());

    let err = setup
        .gate
        .sign_in(sign_in_request("taro@example.com", "wrong-password-1"))
        .await
        .expect_err("Wrong passwords must fail");
    assert_eq!(err.code, ErrorCode::AuthInvalid);
    assert_eq!(err.message, AuthCode::WrongPassword.human_message());
}

// ============================================================================
// Session restore
// ============================================================================

#[tokio::test]
async fn test_observe_without_token_is_unauthenticated() {
    let setup = setup().await.expect("Setup failed");
    assert!(setup.gate.observe_session().await.is_none());
}

#[tokio::test]
async fn test_observe_ignores_token_in_local_only_mode() {
    let (_temp, cache) = common::create_test_cache().expect("Cache setup failed");
    cache
        .store_session("left-over-token")
        .await
        .expect("Token write should succeed");

    let gate = AuthGate::new(RemoteStore::Unconfigured, cache, common::test_config());
    assert!(
        gate.observe_session().await.is_none(),
        "Without a remote store a cached token means nothing"
    );
}

#[tokio::test]
async fn test_observe_clears_rejected_token() {
    let setup = setup().await.expect("Setup failed");
    setup
        .cache
        .store_session("not.a.token")
        .await
        .expect("Token write should succeed");

    assert!(setup.gate.observe_session().await.is_none());
    let remaining = setup
        .cache
        .load_session()
        .await
        .expect("Cache read should succeed");
    assert_eq!(remaining, None, "A rejected token is cleared, not retried");
}

#[tokio::test]
async fn test_observe_clears_session_for_deleted_account() {
    let setup = setup().await.expect("Setup failed");

    // Token signed with the store secret but for an account that was never
    // created.
    let secret = setup
        .store
        .database()
        .expect("Store is configured")
        .get_or_create_system_secret("session_jwt_secret")
        .await
        .expect("Secret generation should succeed");
    let ghost = User::new("ghost@example.com".to_owned(), "hash".to_owned(), None);
    let token = SessionManager::new(secret, 24)
        .issue(&ghost)
        .expect("Signing should succeed");
    setup
        .cache
        .store_session(&token)
        .await
        .expect("Token write should succeed");

    assert!(setup.gate.observe_session().await.is_none());
    let remaining = setup
        .cache
        .load_session()
        .await
        .expect("Cache read should succeed");
    assert_eq!(remaining, None, "Sessions for missing accounts are cleared");
}

// ============================================================================
// Session tokens
// ============================================================================

#[test]
fn test_session_token_round_trip() {
    let user = User::new("taro@example.com".to_owned(), "hash".to_owned(), None);
    let manager = SessionManager::new("test-secret".to_owned(), 24);

    let token = manager.issue(&user).expect("Signing should succeed");
    let claims = manager.verify(&token).expect("Verification should succeed");

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, "taro@example.com");
    assert!(claims.exp > claims.iat, "Expiry lies after issuance");
}

#[test]
fn test_session_token_expiry() {
    let user = User::new("taro@example.com".to_owned(), "hash".to_owned(), None);
    // Negative lifetime backdates the expiry past the verifier's leeway.
    let manager = SessionManager::new("test-secret".to_owned(), -1);

    let token = manager.issue(&user).expect("Signing should succeed");
    let err = manager
        .verify(&token)
        .expect_err("Expired tokens must be rejected");
    assert_eq!(err.code, ErrorCode::AuthExpired);
}

#[test]
fn test_session_token_rejects_wrong_secret() {
    let user = User::new("taro@example.com".to_owned(), "hash".to_owned(), None);
    let token = SessionManager::new("one-secret".to_owned(), 24)
        .issue(&user)
        .expect("Signing should succeed");

    let err = SessionManager::new("another-secret".to_owned(), 24)
        .verify(&token)
        .expect_err("Foreign tokens must be rejected");
    assert_eq!(err.code, ErrorCode::AuthInvalid);
}

// ============================================================================
// Failure-code table and validators
// ============================================================================

#[test]
fn test_auth_code_strings_round_trip() {
    let codes = [
        AuthCode::EmailInUse,
        AuthCode::InvalidEmail,
        AuthCode::OperationNotAllowed,
        AuthCode::WeakPassword,
        AuthCode::UserDisabled,
        AuthCode::UserNotFound,
        AuthCode::WrongPassword,
        AuthCode::InvalidCredential,
        AuthCode::TooManyRequests,
        AuthCode::NetworkFailure,
    ];
    for code in codes {
        assert_eq!(AuthCode::parse(code.as_str()), Some(code));
        assert!(!code.human_message().is_empty());
    }
    assert_eq!(AuthCode::parse("flux-capacitor"), None);
}

#[test]
fn test_human_message_lookup_falls_back_to_raw_code() {
    assert_eq!(
        human_message_for("email-in-use"),
        "This email address is already registered."
    );
    assert_eq!(
        human_message_for("wrong-password"),
        "Incorrect password."
    );
    assert_eq!(
        human_message_for("some-unmapped-code"),
        "some-unmapped-code",
        "Unknown codes surface verbatim rather than hiding the cause"
    );
}

#[test]
fn test_auth_failure_maps_codes() {
    let err = auth_failure(AuthCode::EmailInUse);
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = auth_failure(AuthCode::NetworkFailure);
    assert_eq!(err.code, ErrorCode::NetworkError);

    let err = auth_failure(AuthCode::WrongPassword);
    assert_eq!(err.code, ErrorCode::AuthInvalid);
}

#[test]
fn test_email_validation() {
    assert!(AuthGate::is_valid_email("taro@example.com"));
    assert!(AuthGate::is_valid_email("t@e.co"));

    assert!(!AuthGate::is_valid_email("a@b.c"), "Too short overall");
    assert!(!AuthGate::is_valid_email("taroexample.com"), "No @");
    assert!(!AuthGate::is_valid_email("@example.com"), "Empty local part");
    assert!(!AuthGate::is_valid_email("taro@example"), "No dot in domain");
    assert!(!AuthGate::is_valid_email("taroo@"), "@ at the end");
}

#[test]
fn test_password_validation() {
    assert!(AuthGate::is_valid_password("12345678"));
    assert!(!AuthGate::is_valid_password("1234567"));
}
