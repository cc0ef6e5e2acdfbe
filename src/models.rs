// ABOUTME: Core domain records shared across the crate (accounts, profiles, invites, courses)
// ABOUTME: Enum fields use string representations stable enough to persist in the document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output language for generated assistant prompts
///
/// Stored as a BCP 47 primary subtag. Unknown tags are preserved verbatim so
/// a profile written by a newer client round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    /// Japanese
    Ja,
    /// English
    #[default]
    En,
    /// Chinese
    Zh,
    /// Korean
    Ko,
    /// Spanish
    Es,
    /// French
    Fr,
    /// Any other language tag, kept as-is
    Other(String),
}

impl Language {
    /// Parse a language tag. Region subtags are ignored ("ja-JP" parses as
    /// Japanese); unknown tags are preserved.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split('-').next().unwrap_or(tag).to_lowercase();
        match primary.as_str() {
            "ja" => Self::Ja,
            "en" => Self::En,
            "zh" => Self::Zh,
            "ko" => Self::Ko,
            "es" => Self::Es,
            "fr" => Self::Fr,
            _ => Self::Other(tag.to_owned()),
        }
    }

    /// Language tag as stored in the profile document
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
            Self::Zh => "zh",
            Self::Ko => "ko",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Other(tag) => tag,
        }
    }

    /// English display name, falling back to the raw tag for unknown languages
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ja => "Japanese",
            Self::En => "English",
            Self::Zh => "Chinese",
            Self::Ko => "Korean",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_owned()
    }
}

/// Seller profile: everything the prompt generator needs to know about one
/// seller's business and voice
///
/// All fields default to empty so a profile can be built up incrementally.
/// Multi-select fields use ordered sets, which gives profile equality and
/// prompt generation a stable field order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Seller's name as it should appear in prompts
    pub name: String,
    /// Industry or market the seller operates in
    pub industry: String,
    /// Seller's role or job title
    pub job_title: String,
    /// Experience bucket, free text (e.g. "3-5年")
    pub years_experience: String,
    /// What the seller sells
    pub product_service: String,
    /// Differentiator versus competitors
    pub advantage: String,
    /// Typical deal or price range
    pub price_range: String,
    /// Description of the ideal customer
    pub ideal_customer: String,
    /// Customer pain points the product addresses
    pub pain_points: BTreeSet<String>,
    /// The three questions prospects ask most often
    pub common_questions: [String; 3],
    /// Desired tone of voice for generated content
    pub tone: String,
    /// Signature phrases to weave in
    pub catchphrases: String,
    /// Words and phrasings to avoid
    pub avoid_words: String,
    /// Optional writing sample used to imitate the seller's style
    pub sample_writing: Option<String>,
    /// Platforms the seller publishes on
    pub platforms: BTreeSet<String>,
    /// Preferred content length (short / medium / long, free text)
    pub content_length: String,
    /// Default call to action for generated content
    pub call_to_action: String,
    /// Output language for generated prompts
    pub language: Language,
}

impl Profile {
    /// A profile is usable once the seller has said who they are and what
    /// market they're in. Everything else can stay blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.industry.trim().is_empty()
    }

    /// Add the pain point if absent, remove it if present
    pub fn toggle_pain_point(&mut self, tag: &str) {
        if !self.pain_points.remove(tag) {
            self.pain_points.insert(tag.to_owned());
        }
    }

    /// Add the platform if absent, remove it if present
    pub fn toggle_platform(&mut self, tag: &str) {
        if !self.platforms.remove(tag) {
            self.platforms.insert(tag.to_owned());
        }
    }
}

/// Registered account in the remote document store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address, stored lowercase
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Bcrypt hash of the account password
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last successful sign-in or session refresh
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new account record with server-assigned id and timestamps
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            display_name,
            password_hash,
            created_at: now,
            last_active: now,
        }
    }
}

/// Lifecycle of an invite code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    /// Issued but not yet redeemed
    #[default]
    Unused,
    /// Redeemed during sign-up; permanently consumed
    Used,
}

impl InviteStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unused => "unused",
            Self::Used => "used",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "used" => Self::Used,
            _ => Self::Unused,
        }
    }
}

/// Single-use onboarding code tied to one student's email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteCode {
    /// Identifier: issue timestamp in milliseconds joined with the code,
    /// e.g. "1767225600000_A3X9QK". Sorting ids sorts by issue time.
    pub id: String,
    /// Six characters from A-Z and 0-9, stored uppercase
    pub code: String,
    /// Student email the code was issued for, stored lowercase
    pub email: String,
    /// Student name for listings
    pub name: String,
    /// Whether the code has been redeemed
    pub status: InviteStatus,
    /// Course the invite belongs to, if any
    pub course_id: Option<String>,
    /// Email of the admin who issued the code
    pub created_by: String,
    /// When the code was issued
    pub created_at: DateTime<Utc>,
    /// When the code was redeemed
    pub used_at: Option<DateTime<Utc>>,
}

impl InviteCode {
    /// Create a new unused invite. The id embeds the issue timestamp so
    /// listings can be ordered without consulting `created_at`.
    #[must_use]
    pub fn new(
        code: String,
        email: &str,
        name: String,
        course_id: Option<String>,
        created_by: String,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("{}_{code}", created_at.timestamp_millis()),
            code,
            email: email.to_lowercase(),
            name,
            status: InviteStatus::Unused,
            course_id,
            created_by,
            created_at,
            used_at: None,
        }
    }
}

/// Course cohort that invites can be grouped under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Identifier: "course_" followed by the creation timestamp in milliseconds
    pub id: String,
    /// Course name, unique per deployment by convention
    pub name: String,
    /// Start date, taken from a leading date in the name when present
    pub course_date: DateTime<Utc>,
    /// Denormalized count of invites issued for this course
    pub student_count: i64,
    /// Email of the admin who created the course
    pub created_by: String,
    /// When the course record was created
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Create a new course record with a server-assigned id
    #[must_use]
    pub fn new(name: String, course_date: DateTime<Utc>, created_by: String) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("course_{}", created_at.timestamp_millis()),
            name,
            course_date,
            student_count: 0,
            created_by,
            created_at,
        }
    }
}
