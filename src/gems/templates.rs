// ABOUTME: Markdown prompt skeletons and the section builders that fill them from a profile
// ABOUTME: Every builder is a literal-substitution function; empty fields render as placeholders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

use std::collections::BTreeSet;
use std::fmt::Write;

use super::language;
use super::{FrameworkTier, GemKind, GeneratedGem, PLACEHOLDER};
use crate::models::Profile;

/// Render a scalar field, falling back to the placeholder when blank
fn field(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER
    } else {
        trimmed
    }
}

/// Render a set-valued field as a comma-joined list
fn list_field(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        values
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Render the three common-question slots as a numbered list
fn questions_block(questions: &[String; 3]) -> String {
    let mut block = String::new();
    for (i, question) in questions.iter().enumerate() {
        let _ = writeln!(block, "{}. {}", i + 1, field(question));
    }
    block
}

/// The business context section shared by every gem
fn business_block(profile: &Profile) -> String {
    format!(
        "## Business context\n\n\
         - Seller: {name} ({job_title})\n\
         - Industry: {industry}\n\
         - Product / service: {product}\n\
         - Key advantage over alternatives: {advantage}\n\
         - Typical price range: {price}\n",
        name = field(&profile.name),
        job_title = field(&profile.job_title),
        industry = field(&profile.industry),
        product = field(&profile.product_service),
        advantage = field(&profile.advantage),
        price = field(&profile.price_range),
    )
}

/// The audience section shared by every gem
fn audience_block(profile: &Profile) -> String {
    format!(
        "## Audience\n\n\
         - Ideal customer: {ideal}\n\
         - Pain points to speak to: {pains}\n\n\
         Questions this audience asks most often:\n\n\
         {questions}",
        ideal = field(&profile.ideal_customer),
        pains = list_field(&profile.pain_points),
        questions = questions_block(&profile.common_questions),
    )
}

/// The voice section shared by every gem, with the optional writing sample
fn voice_block(profile: &Profile) -> String {
    let mut block = format!(
        "## Voice and style\n\n\
         - Tone: {tone}\n\
         - Signature phrases to weave in: {phrases}\n\
         - Words and phrasings to avoid: {avoid}\n",
        tone = field(&profile.tone),
        phrases = field(&profile.catchphrases),
        avoid = field(&profile.avoid_words),
    );

    if let Some(sample) = profile
        .sample_writing
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let _ = write!(
            block,
            "\nWriting sample to imitate:\n\n> {sample}\n"
        );
    }

    block
}

/// Framework guidance per tier; the heart of what changes with experience
fn framework_block(tier: FrameworkTier) -> String {
    let guidance = match tier {
        FrameworkTier::Beginner => {
            "Use the PAS framework (Problem - Agitate - Solution):\n\
             - Open with the customer's problem in their own words.\n\
             - Make the cost of leaving it unsolved concrete.\n\
             - Present the offer as the resolution, ending in one clear next step.\n\
             Keep sentences short and use one idea per paragraph. No jargon."
        }
        FrameworkTier::Intermediate => {
            "Use the AIDA framework (Attention - Interest - Desire - Action):\n\
             - Attention: lead with the single strongest hook for this audience.\n\
             - Interest: connect the hook to a pain point within two sentences.\n\
             - Desire: back the promise with one piece of proof (number, result, testimonial).\n\
             - Action: close with exactly one unambiguous call to action.\n\
             Include one piece of social proof in every piece of output."
        }
        FrameworkTier::Advanced => {
            "Use the PASTOR framework (Problem - Amplify - Story - Transformation - Offer - Response):\n\
             - Anchor the problem, then amplify what it costs the reader over time.\n\
             - Tell a short, specific customer story with a before and after.\n\
             - Present the offer as the bridge to the transformation.\n\
             - Pre-empt the two most likely objections before the close.\n\
             Adjust the opening by the reader's stage of awareness (cold, warm, ready)."
        }
        FrameworkTier::Expert => {
            "Use the QUEST framework (Qualify - Understand - Educate - Stimulate - Transition), layered with positioning:\n\
             - Qualify the reader in the first two lines so the wrong audience selects itself out.\n\
             - Lead with a reframing insight that challenges how the reader sees the problem.\n\
             - Educate from the seller's unique point of view, not generic best practice.\n\
             - Stimulate desire through contrast: life with versus without the offer.\n\
             - Transition with a low-friction next step that matches deal size.\n\
             Treat each piece as one touch in a longer nurture arc and say which touch it is."
        }
    };

    format!(
        "## Framework ({tier_name} tier)\n\n{guidance}\n",
        tier_name = tier.display_name(),
    )
}

/// Assemble a full gem body from its role paragraph and task section
fn assemble_body(
    title: &str,
    role: &str,
    profile: &Profile,
    tier: FrameworkTier,
    task: &str,
) -> String {
    format!(
        "# {title}\n\n\
         {role}\n\n\
         {business}\n\
         {audience}\n\
         {voice}\n\
         {framework}\n\
         ## Your task\n\n\
         {task}\n\n\
         {language}",
        business = business_block(profile),
        audience = audience_block(profile),
        voice = voice_block(profile),
        framework = framework_block(tier),
        language = language::instruction_block(&profile.language),
    )
}

pub(super) fn content_gem(profile: &Profile, tier: FrameworkTier) -> GeneratedGem {
    let role = format!(
        "You are the dedicated content marketing assistant for {name}, \
         a {job_title} in the {industry} industry. You turn their expertise \
         into posts and articles their ideal customers actually stop to read.",
        name = field(&profile.name),
        job_title = field(&profile.job_title),
        industry = field(&profile.industry),
    );

    let task = format!(
        "When asked for content, produce it for these platforms: {platforms}.\n\
         Default length: {length}. Always end with this call to action unless \
         told otherwise: {cta}.\n\
         Write in the voice described above, never in a generic marketing voice. \
         If a request is ambiguous, ask one clarifying question, then write.",
        platforms = list_field(&profile.platforms),
        length = field(&profile.content_length),
        cta = field(&profile.call_to_action),
    );

    GeneratedGem {
        id: "content_creator",
        kind: GemKind::Content,
        title: "Content Creation Assistant".to_owned(),
        description: "Drafts platform-ready posts and articles in the seller's voice."
            .to_owned(),
        body: assemble_body("Content Creation Assistant", &role, profile, tier, &task),
        examples: vec![
            "Write a post introducing our service to someone who has never heard of us."
                .to_owned(),
            "Turn this customer result into a short case-study post: ...".to_owned(),
            "Give me five hook lines for this week's content.".to_owned(),
        ],
    }
}

pub(super) fn presentation_gem(profile: &Profile, tier: FrameworkTier) -> GeneratedGem {
    let role = format!(
        "You are the presentation coach for {name}. You structure sales \
         presentations and talk tracks that move a {industry} audience from \
         polite interest to a decision.",
        name = field(&profile.name),
        industry = field(&profile.industry),
    );

    let task = "When asked for a presentation, return: (1) a slide-by-slide outline with \
         one message per slide, (2) a spoken opening of at most four sentences, and \
         (3) a closing slide that lands the call to action. Flag any slide that \
         carries more than one idea."
        .to_owned();

    GeneratedGem {
        id: "presentation_builder",
        kind: GemKind::Presentation,
        title: "Presentation Builder".to_owned(),
        description: "Outlines sales presentations and talk tracks slide by slide.".to_owned(),
        body: assemble_body("Presentation Builder", &role, profile, tier, &task),
        examples: vec![
            "Outline a 10-minute pitch for a first meeting.".to_owned(),
            "Rework my opening so it leads with the customer's problem.".to_owned(),
            "Build a one-slide summary I can leave behind.".to_owned(),
        ],
    }
}

pub(super) fn qa_gem(profile: &Profile, tier: FrameworkTier) -> GeneratedGem {
    let role = format!(
        "You are the customer question assistant for {name}. You answer \
         prospect questions about {product} accurately, in the seller's voice, \
         without overpromising.",
        name = field(&profile.name),
        product = field(&profile.product_service),
    );

    let task = "When given a customer question, answer it in three parts: a direct \
         answer first, the reasoning or evidence second, and a bridge back to the \
         conversation third. If the question matches one of the common questions \
         above, reuse and refine that ground. If you do not know, say so and \
         offer to find out; never invent specifics about pricing or guarantees."
        .to_owned();

    GeneratedGem {
        id: "qa_responder",
        kind: GemKind::Qa,
        title: "Customer Q&A Assistant".to_owned(),
        description: "Answers prospect questions directly and bridges back to the sale."
            .to_owned(),
        body: assemble_body("Customer Q&A Assistant", &role, profile, tier, &task),
        examples: vec![
            "A prospect asked how we differ from cheaper alternatives. Draft a reply."
                .to_owned(),
            "Answer this objection about the price range.".to_owned(),
            "Prepare answers for the three questions we hear most.".to_owned(),
        ],
    }
}

pub(super) fn sales_gem(profile: &Profile, tier: FrameworkTier) -> GeneratedGem {
    let role = format!(
        "You are the sales copy assistant for {name}. You write offers, landing \
         copy, and proposals that make {advantage} impossible to miss.",
        name = field(&profile.name),
        advantage = field(&profile.advantage),
    );

    let task = format!(
        "When asked for sales copy, anchor every piece on the ideal customer and \
         their pain points above. State the price range ({price}) plainly when \
         relevant instead of hiding it. Close with: {cta}. \
         Offer one variant optimized for skimming and one for careful readers.",
        price = field(&profile.price_range),
        cta = field(&profile.call_to_action),
    );

    GeneratedGem {
        id: "sales_copy",
        kind: GemKind::Sales,
        title: "Sales Copy Assistant".to_owned(),
        description: "Writes offers and proposals anchored on the seller's advantage."
            .to_owned(),
        body: assemble_body("Sales Copy Assistant", &role, profile, tier, &task),
        examples: vec![
            "Write the offer section for our next campaign.".to_owned(),
            "Draft a one-page proposal summary for a warm lead.".to_owned(),
            "Tighten this landing page copy without losing the guarantees.".to_owned(),
        ],
    }
}

pub(super) fn email_gem(profile: &Profile, tier: FrameworkTier) -> GeneratedGem {
    let role = format!(
        "You are the email assistant for {name}. You write outreach, follow-up, \
         and nurture emails that sound like a busy {job_title}, not a newsletter.",
        name = field(&profile.name),
        job_title = field(&profile.job_title),
    );

    let task = "When asked for an email, return a subject line, a body under 150 words \
         unless asked for more, and a single call to action. For follow-ups, \
         reference the last touchpoint in the first sentence. Offer two subject \
         line variants: one curiosity-led, one benefit-led."
        .to_owned();

    GeneratedGem {
        id: "email_writer",
        kind: GemKind::Email,
        title: "Email Writing Assistant".to_owned(),
        description: "Writes outreach and follow-up emails with tight subject lines.".to_owned(),
        body: assemble_body("Email Writing Assistant", &role, profile, tier, &task),
        examples: vec![
            "Write a first-touch email to a lead who downloaded our guide.".to_owned(),
            "Draft a polite third follow-up after two unanswered emails.".to_owned(),
            "Turn this meeting summary into a recap email with next steps.".to_owned(),
        ],
    }
}
