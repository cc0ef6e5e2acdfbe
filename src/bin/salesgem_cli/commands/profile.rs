// ABOUTME: Sales profile commands for salesgem-cli
// ABOUTME: Shows, edits, and clears the profile that feeds gem generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use clap::Args;
use uuid::Uuid;

use salesgem::errors::{AppError, AppResult};
use salesgem::local_cache::LocalCache;
use salesgem::models::{Language, Profile};
use salesgem::profile_store::ProfileStore;

/// Field updates for `profile set`; omitted flags leave the field untouched
#[derive(Debug, Args)]
pub struct SetArgs {
    /// Seller name
    #[arg(long)]
    name: Option<String>,

    /// Industry
    #[arg(long)]
    industry: Option<String>,

    /// Job title
    #[arg(long)]
    job_title: Option<String>,

    /// Years of experience, e.g. "5-10年"
    #[arg(long)]
    years: Option<String>,

    /// Product or service description
    #[arg(long)]
    product: Option<String>,

    /// Competitive advantage
    #[arg(long)]
    advantage: Option<String>,

    /// Price range
    #[arg(long)]
    price_range: Option<String>,

    /// Ideal customer description
    #[arg(long)]
    ideal_customer: Option<String>,

    /// Add a customer pain point (repeatable)
    #[arg(long)]
    add_pain_point: Vec<String>,

    /// Remove a customer pain point (repeatable)
    #[arg(long)]
    remove_pain_point: Vec<String>,

    /// Replace one of the three common questions, given as "N:text" with N in 1-3
    #[arg(long)]
    question: Vec<String>,

    /// Tone of voice
    #[arg(long)]
    tone: Option<String>,

    /// Catchphrases
    #[arg(long)]
    catchphrases: Option<String>,

    /// Words to avoid
    #[arg(long)]
    avoid_words: Option<String>,

    /// Writing sample; pass an empty string to remove it
    #[arg(long)]
    sample_writing: Option<String>,

    /// Add a target platform (repeatable)
    #[arg(long)]
    add_platform: Vec<String>,

    /// Remove a target platform (repeatable)
    #[arg(long)]
    remove_platform: Vec<String>,

    /// Preferred content length
    #[arg(long)]
    content_length: Option<String>,

    /// Default call to action
    #[arg(long)]
    call_to_action: Option<String>,

    /// Output language tag, e.g. "ja" or "en"
    #[arg(long)]
    language: Option<String>,
}

/// Print the stored profile as JSON
pub async fn show(profiles: &ProfileStore, user_id: Option<Uuid>) -> AppResult<()> {
    let profile = profiles.load(user_id).await;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Apply field updates and persist the result
pub async fn set(profiles: &ProfileStore, user_id: Option<Uuid>, args: SetArgs) -> AppResult<()> {
    let mut profile = profiles.load(user_id).await;
    apply(&mut profile, args)?;
    profiles.save(user_id, &profile).await?;

    if profile.is_complete() {
        println!("Profile saved");
    } else {
        println!("Profile saved (name and industry still needed for gems)");
    }
    Ok(())
}

/// Remove the locally cached profile
pub async fn clear(cache: &LocalCache) -> AppResult<()> {
    cache.clear_profile().await?;
    println!("Local profile cleared");
    Ok(())
}

fn apply(profile: &mut Profile, args: SetArgs) -> AppResult<()> {
    if let Some(name) = args.name {
        profile.name = name;
    }
    if let Some(industry) = args.industry {
        profile.industry = industry;
    }
    if let Some(job_title) = args.job_title {
        profile.job_title = job_title;
    }
    if let Some(years) = args.years {
        profile.years_experience = years;
    }
    if let Some(product) = args.product {
        profile.product_service = product;
    }
    if let Some(advantage) = args.advantage {
        profile.advantage = advantage;
    }
    if let Some(price_range) = args.price_range {
        profile.price_range = price_range;
    }
    if let Some(ideal_customer) = args.ideal_customer {
        profile.ideal_customer = ideal_customer;
    }
    if let Some(tone) = args.tone {
        profile.tone = tone;
    }
    if let Some(catchphrases) = args.catchphrases {
        profile.catchphrases = catchphrases;
    }
    if let Some(avoid_words) = args.avoid_words {
        profile.avoid_words = avoid_words;
    }
    if let Some(sample) = args.sample_writing {
        profile.sample_writing = Some(sample).filter(|s| !s.trim().is_empty());
    }
    if let Some(content_length) = args.content_length {
        profile.content_length = content_length;
    }
    if let Some(call_to_action) = args.call_to_action {
        profile.call_to_action = call_to_action;
    }
    if let Some(tag) = args.language {
        profile.language = Language::from_tag(&tag);
    }

    for point in args.add_pain_point {
        profile.pain_points.insert(point);
    }
    for point in args.remove_pain_point {
        profile.pain_points.remove(&point);
    }
    for platform in args.add_platform {
        profile.platforms.insert(platform);
    }
    for platform in args.remove_platform {
        profile.platforms.remove(&platform);
    }
    for spec in &args.question {
        set_question(profile, spec)?;
    }

    Ok(())
}

fn set_question(profile: &mut Profile, spec: &str) -> AppResult<()> {
    let Some((index, text)) = spec.split_once(':') else {
        return Err(AppError::invalid_input(
            "Question must be given as \"N:text\" with N in 1-3",
        ));
    };
    let slot = match index.trim() {
        "1" => 0,
        "2" => 1,
        "3" => 2,
        _ => {
            return Err(AppError::invalid_input("Question index must be 1, 2, or 3"));
        }
    };
    profile.common_questions[slot] = text.trim().to_owned();
    Ok(())
}
