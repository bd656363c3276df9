//! The canonical Statement of Work section table.
//!
//! Every generated SoW contains exactly these ten sections, in exactly this
//! order — the table is the contract between the assembler (which walks it)
//! and downstream consumers that expect a predictable document shape.
//! Centralising the titles, instructions, trigger keywords, and policies here
//! means a wording tweak touches exactly one place.

use serde::{Deserialize, Serialize};

/// How a section's body is produced.
///
/// Checked in this order by the section generator; the variants are mutually
/// exclusive per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionPolicy {
    /// Body comes from a local template file (backend never invoked);
    /// a canned fallback sentence covers a missing/unreadable file.
    Template,
    /// Body is generated only when at least one trigger keyword appears in
    /// the proposal; otherwise a fixed placeholder is emitted without a
    /// backend call.
    KeywordGated,
    /// Body is always generated from the proposal context.
    Generated,
}

/// Immutable definition of one SoW section.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    /// Heading text, also used as the slide/paragraph title in rendered output.
    pub title: &'static str,
    /// One-line instruction embedded in the generation prompt.
    pub instruction: &'static str,
    /// Lowercase trigger keywords for [`SectionPolicy::KeywordGated`] specs.
    /// Matched case-insensitively as substrings of the proposal text.
    pub keywords: &'static [&'static str],
    pub policy: SectionPolicy,
}

/// The fixed, ordered section table. Order is load-bearing: assembly emits
/// sections in table order regardless of how generation is scheduled.
pub static SOW_SECTIONS: [SectionSpec; 10] = [
    SectionSpec {
        title: "DURATION",
        instruction: "Mention duration and expected timeline.",
        keywords: &["duration", "start", "end", "months", "weeks"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "SERVICES AND DELIVERABLES",
        instruction: "List services and deliverables.",
        keywords: &["deliverables", "scope", "services"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "IMPLEMENTATION TIMELINE",
        instruction: "Break into phases with time estimate.",
        keywords: &["timeline", "phase", "milestone"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "ACCEPTANCE CRITERIA",
        instruction: "List what defines project success.",
        keywords: &["acceptance", "criteria"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "GOVERNANCE AND MONITORING",
        instruction: "Mention reviews, stakeholders, issues.",
        keywords: &["governance", "monitoring"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "TEAM & ROLES",
        instruction: "List key roles and locations.",
        keywords: &["roles", "team"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "COMMERCIALS AND PAYMENT SCHEDULE",
        instruction: "Describe effort, milestones, and payments.",
        keywords: &["cost", "price"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "ASSUMPTIONS AND EXCLUSIONS",
        instruction: "Mention assumptions, dependencies, out-of-scope.",
        keywords: &["assumptions"],
        policy: SectionPolicy::KeywordGated,
    },
    SectionSpec {
        title: "DATA PROTECTION AND COMPLIANCE (e.g., GDPR)",
        instruction: "Mention data policies.",
        keywords: &[],
        policy: SectionPolicy::Template,
    },
    SectionSpec {
        title: "SIGN-OFF SECTION",
        instruction: "Include placeholders for sign-off.",
        keywords: &["signature"],
        policy: SectionPolicy::KeywordGated,
    },
];
