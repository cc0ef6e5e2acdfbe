// ABOUTME: Prompt artifact ("gem") generation from a seller profile
// ABOUTME: Pure functions; the same profile always yields byte-identical artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

/// Per-language output instruction blocks
pub mod language;
mod templates;

use serde::Serialize;

use crate::models::Profile;

/// Placeholder substituted for profile fields the seller has not filled in yet
pub const PLACEHOLDER: &str = "[please fill in]";

/// The fixed set of assistant prompts generated from one profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GemKind {
    /// Social posts and articles
    Content,
    /// Talk tracks and slide outlines
    Presentation,
    /// Customer question answering
    Qa,
    /// Sales copy and offers
    Sales,
    /// Outreach and follow-up email
    Email,
}

impl GemKind {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Presentation => "presentation",
            Self::Qa => "qa",
            Self::Sales => "sales",
            Self::Email => "email",
        }
    }

    /// Human-readable display name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::Presentation => "Presentation",
            Self::Qa => "Q&A",
            Self::Sales => "Sales",
            Self::Email => "Email",
        }
    }
}

/// Experience-based complexity bucket selecting which framework guidance a
/// generated prompt carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkTier {
    /// Under three years, or nothing recognizable
    Beginner,
    /// Three to five years
    Intermediate,
    /// Five to ten years
    Advanced,
    /// A decade or more
    Expert,
}

impl FrameworkTier {
    /// Pick the tier from the profile's experience bucket string
    ///
    /// The buckets come from the profile form verbatim, so this is a substring
    /// match with the most senior bucket checked first. Anything
    /// unrecognizable, including an empty string, lands on Beginner.
    #[must_use]
    pub fn select(years_experience: &str) -> Self {
        if years_experience.contains("10年以上") {
            Self::Expert
        } else if years_experience.contains("5-10年") {
            Self::Advanced
        } else if years_experience.contains("3-5年") {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }

    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Human-readable display name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

/// One generated assistant prompt, ready to paste into an external AI chat
///
/// Artifacts are ephemeral: recomputed on demand, never persisted. Generation
/// is cheap and deterministic, so there is nothing to cache or invalidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedGem {
    /// Stable identifier, unique within one generation pass
    pub id: &'static str,
    /// Which assistant this prompt sets up
    pub kind: GemKind,
    /// Human title shown in listings
    pub title: String,
    /// One-line description of what the assistant does
    pub description: String,
    /// The full prompt body in Markdown
    pub body: String,
    /// Short example invocations to try first
    pub examples: Vec<String>,
}

/// Generate the full prompt pack for a profile
///
/// Pure and total: missing fields degrade to [`PLACEHOLDER`] text, and the
/// artifact order is fixed, so identical profiles produce byte-identical
/// output.
#[must_use]
pub fn generate(profile: &Profile) -> Vec<GeneratedGem> {
    let tier = FrameworkTier::select(&profile.years_experience);
    vec![
        templates::content_gem(profile, tier),
        templates::presentation_gem(profile, tier),
        templates::qa_gem(profile, tier),
        templates::sales_gem(profile, tier),
        templates::email_gem(profile, tier),
    ]
}
