//! Proposal text cleanup: deterministic passes tuned for typical proposal
//! boilerplate.
//!
//! ## Why is cleanup necessary?
//!
//! Extracted proposal text carries artefacts that pollute generation
//! context — page numbers glued to running headers, the proposal's own
//! section titles repeated on every page, and whitespace noise from table
//! layouts. These passes are lossy by design: they trade fidelity for a
//! cleaner prompt context.
//!
//! ## Pass Order
//!
//! Order matters: boilerplate removal runs on the raw line structure, then
//! newline runs collapse, then remaining whitespace runs collapse. Running
//! the whitespace pass first would merge lines and hide the header
//! artefacts from the first pass.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// Page-number-plus-running-header artefacts: optional leading newline, one
// or two digits, optional space, then 3+ uppercase letters/spaces.
static RE_RUNNING_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?\d{1,2}\s?[A-Z ]{3,}").unwrap());

// Section-title phrases that recur in proposal boilerplate and add nothing
// to generation context.
static RE_TITLE_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Executive Summary|Our Understanding|Overall Scope of Work|Assumptions and Dependencies")
        .unwrap()
});

static RE_NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
static RE_WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Clean raw proposal text for use as generation context.
///
/// Passes (applied in order):
/// 1. Remove running-header artefacts and known boilerplate phrases
/// 2. Collapse newline runs to a single newline
/// 3. Collapse remaining whitespace runs to a single space
/// 4. Trim
pub fn clean_proposal_text(raw: &str) -> String {
    let s = RE_RUNNING_HEADER.replace_all(raw, "");
    let s = RE_TITLE_NOISE.replace_all(&s, "");
    let s = RE_NEWLINE_RUNS.replace_all(&s, "\n");
    let s = RE_WHITESPACE_RUNS.replace_all(&s, " ");
    s.trim().to_string()
}

/// Drop exact repeated lines, keeping the first occurrence in order.
///
/// Applied to generated section bodies only — generation backends repeat
/// themselves under low temperature, and a SoW section reads badly with the
/// same sentence twice. Empty lines are dropped too. Idempotent.
pub fn deduplicate_lines(text: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut result: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();
        if !line.is_empty() && seen.insert(line) {
            result.push(line);
        }
    }

    result.join("\n")
}
