// ABOUTME: Account commands for salesgem-cli
// ABOUTME: Signup with an invite code, login, logout, and session status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use salesgem::auth::{AuthGate, SignInRequest, SignUpRequest};
use salesgem::errors::AppResult;

/// Create an account, consuming the invite code issued to this email
pub async fn signup(
    auth: &AuthGate,
    email: String,
    password: String,
    code: String,
    name: Option<String>,
) -> AppResult<()> {
    let session = auth
        .sign_up(SignUpRequest {
            name: name.unwrap_or_default(),
            email,
            password,
            invite_code: code,
        })
        .await?;
    println!("Account created and signed in as {}", session.email);
    Ok(())
}

/// Sign in with email and password
pub async fn login(auth: &AuthGate, email: String, password: String) -> AppResult<()> {
    let session = auth.sign_in(SignInRequest { email, password }).await?;
    println!("Signed in as {}", session.email);
    Ok(())
}

/// Sign out of the current session
pub async fn logout(auth: &AuthGate) -> AppResult<()> {
    auth.sign_out().await?;
    println!("Signed out");
    Ok(())
}

/// Print whether a session is active
pub async fn status(auth: &AuthGate) -> AppResult<()> {
    match auth.observe_session().await {
        Some(session) => println!("Signed in as {} ({})", session.email, session.user_id),
        None => println!("Not signed in"),
    }
    Ok(())
}
