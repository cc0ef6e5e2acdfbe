// ABOUTME: Gem generation command for salesgem-cli
// ABOUTME: Renders the five prompt artifacts from the stored profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use uuid::Uuid;

use salesgem::errors::{AppError, AppResult};
use salesgem::gems;
use salesgem::profile_store::ProfileStore;

/// Generate the five gems from the stored profile
pub async fn generate(profiles: &ProfileStore, user_id: Option<Uuid>, json: bool) -> AppResult<()> {
    let profile = profiles.load(user_id).await;
    if !profile.is_complete() {
        return Err(AppError::invalid_input(
            "Profile is not set up yet; set at least a name and industry with `salesgem-cli profile set`",
        ));
    }

    let artifacts = gems::generate(&profile);

    if json {
        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        return Ok(());
    }

    for gem in &artifacts {
        println!("=== {} ({}) ===", gem.title, gem.kind.display_name());
        println!("{}", gem.description);
        println!();
        println!("{}", gem.body);
        if !gem.examples.is_empty() {
            println!("Example prompts:");
            for example in &gem.examples {
                println!("  - {example}");
            }
        }
        println!();
    }
    Ok(())
}
