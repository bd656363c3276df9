//! Prompt construction and fixed body texts.
//!
//! Centralising every prompt and literal body here serves two purposes:
//!
//! 1. **Single source of truth** — changing the consultant persona or the
//!    placeholder wording requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    calling a real generation backend.

/// Title line prepended to every composed document.
pub const DOC_TITLE: &str = "**Statement of Work for [Project Title]**";

/// Body emitted for a keyword-gated section whose keywords never appear in
/// the proposal. The exact wording is part of the output contract.
pub const PLACEHOLDER_BODY: &str = "To be defined during project discovery.";

/// Fallback body for the compliance section when the template file cannot
/// be read.
pub const COMPLIANCE_FALLBACK: &str =
    "Standard GDPR compliance policies will be added during the final contracting stage.";

/// Build the generation prompt for one section.
///
/// Embeds at most `context_chars` characters of proposal text; proposals run
/// long and the tail rarely adds signal the backend can use within its
/// output budget.
pub fn section_prompt(title: &str, instruction: &str, proposal: &str, context_chars: usize) -> String {
    format!(
        "You are a consultant. Write the **{title}** section of a Statement of Work. \
Instruction: {instruction}\nContext:\n{context}\n",
        context = truncate_chars(proposal, context_chars),
    )
}

/// First `n` characters of `s` (not bytes — slicing mid-codepoint panics).
pub fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_title_and_instruction() {
        let p = section_prompt("DURATION", "Mention duration.", "six months of work", 2000);
        assert!(p.contains("**DURATION**"));
        assert!(p.contains("Mention duration."));
        assert!(p.contains("six months of work"));
    }

    #[test]
    fn prompt_context_is_bounded() {
        let proposal = "x".repeat(5000);
        let p = section_prompt("DURATION", "i", &proposal, 2000);
        assert!(p.matches('x').count() == 2000);
    }

    #[test]
    fn truncate_chars_respects_codepoints() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
