//! Per-section body production: route one section through its policy and,
//! when generating, drive the backend call.
//!
//! ## Return Value
//!
//! Always returns a [`SectionReport`] — never propagates an error upward, so
//! a single bad backend call cannot abort the document. Callers check
//! `report.error` to distinguish degraded sections; the template and
//! placeholder policies cannot fail at all.

use std::sync::Arc;
use std::time::Instant;

use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::config::SowConfig;
use crate::error::SectionError;
use crate::generator::{GenerationRequest, TextGenerator};
use crate::output::{SectionOutcome, SectionReport};
use crate::pipeline::normalize::deduplicate_lines;
use crate::prompts::{self, COMPLIANCE_FALLBACK, PLACEHOLDER_BODY};
use crate::sections::{SectionPolicy, SectionSpec};

/// Produce the body for one section.
///
/// Policies, checked in order:
/// 1. `Template` — read the template file; any read failure falls back to a
///    canned sentence. The backend is never invoked.
/// 2. `KeywordGated` — if none of the trigger keywords occur in the proposal
///    (case-insensitive substring match), emit the fixed placeholder without
///    a backend call; otherwise generate.
/// 3. `Generated` — always generate.
pub async fn generate_section(
    generator: &Arc<dyn TextGenerator>,
    index: usize,
    spec: &SectionSpec,
    proposal: &str,
    config: &SowConfig,
) -> SectionReport {
    let start = Instant::now();

    if spec.policy == SectionPolicy::Template {
        let (body, outcome) = template_body(config).await;
        return report(index, spec, outcome, body, None, start);
    }

    if spec.policy == SectionPolicy::KeywordGated && !keywords_present(spec, proposal) {
        debug!("Section '{}': no trigger keywords in proposal", spec.title);
        return report(
            index,
            spec,
            SectionOutcome::Placeholder,
            PLACEHOLDER_BODY.to_string(),
            None,
            start,
        );
    }

    let request = GenerationRequest {
        prompt: prompts::section_prompt(
            spec.title,
            spec.instruction,
            proposal,
            config.context_chars,
        ),
        max_tokens: config.max_output_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
    };

    let call = generator.generate(&request);
    match timeout(Duration::from_secs(config.api_timeout_secs), call).await {
        Ok(Ok(text)) => report(
            index,
            spec,
            SectionOutcome::Generated,
            deduplicate_lines(&text),
            None,
            start,
        ),
        Ok(Err(e)) => {
            warn!("Section '{}': backend failed — {}", spec.title, e);
            let error = SectionError::Backend {
                section: spec.title.to_string(),
                detail: e.to_string(),
            };
            report(index, spec, SectionOutcome::Failed, String::new(), Some(error), start)
        }
        Err(_) => {
            warn!(
                "Section '{}': backend timed out after {}s",
                spec.title, config.api_timeout_secs
            );
            let error = SectionError::Timeout {
                section: spec.title.to_string(),
                secs: config.api_timeout_secs,
            };
            report(index, spec, SectionOutcome::Failed, String::new(), Some(error), start)
        }
    }
}

/// Template body with silent fallback. Read failure is expected in fresh
/// deployments and must never surface as an error.
async fn template_body(config: &SowConfig) -> (String, SectionOutcome) {
    match tokio::fs::read_to_string(&config.template_path).await {
        Ok(text) => (text.trim().to_string(), SectionOutcome::Template),
        Err(e) => {
            warn!(
                "Template '{}' unreadable ({}); using fallback text",
                config.template_path.display(),
                e
            );
            (COMPLIANCE_FALLBACK.to_string(), SectionOutcome::Template)
        }
    }
}

fn keywords_present(spec: &SectionSpec, proposal: &str) -> bool {
    if spec.keywords.is_empty() {
        return true;
    }
    let haystack = proposal.to_lowercase();
    spec.keywords.iter().any(|kw| haystack.contains(kw))
}

fn report(
    index: usize,
    spec: &SectionSpec,
    outcome: SectionOutcome,
    body: String,
    error: Option<SectionError>,
    start: Instant,
) -> SectionReport {
    SectionReport {
        index,
        title: spec.title.to_string(),
        outcome,
        body,
        error,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
