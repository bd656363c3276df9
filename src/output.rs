//! Result types returned by the top-level `generate_sow*` functions.
//!
//! Everything here is `serde`-serialisable so the CLI's `--json` mode can
//! dump a run verbatim and so callers can persist run reports.

use serde::{Deserialize, Serialize};

use crate::error::SectionError;

/// Which of the three body policies actually produced a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionOutcome {
    /// Backend call succeeded.
    Generated,
    /// Body came from the template file (or its canned fallback).
    Template,
    /// Keyword gate missed; fixed placeholder emitted.
    Placeholder,
    /// Backend call failed; body is an inline error marker.
    Failed,
}

/// Per-section result of one generation run.
///
/// `body` is empty when `error` is set — the visible inline marker is
/// produced at assembly time, not stored here, so callers that want
/// structured failure handling get the real [`SectionError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    /// Position in the canonical section table (0-based).
    pub index: usize,
    pub title: String,
    pub outcome: SectionOutcome,
    pub body: String,
    pub error: Option<SectionError>,
    pub duration_ms: u64,
}

impl SectionReport {
    /// The text that appears under this section's heading in the composed
    /// document: the trimmed body, or the inline error marker for a failed
    /// backend call.
    pub fn display_body(&self) -> String {
        match &self.error {
            Some(e) => format!("[ERROR generating section: {}]", e.reason()),
            None => self.body.trim().to_string(),
        }
    }
}

/// Aggregate statistics for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SowStats {
    pub total_sections: usize,
    pub generated_sections: usize,
    pub template_sections: usize,
    pub placeholder_sections: usize,
    pub failed_sections: usize,
    /// Wall-clock for the whole request.
    pub total_duration_ms: u64,
    /// Wall-clock of the section-generation stage (all backend calls).
    pub generation_duration_ms: u64,
}

impl SowStats {
    /// Tally outcome counts from the per-section reports.
    pub fn tally(reports: &[SectionReport]) -> Self {
        let mut stats = Self {
            total_sections: reports.len(),
            ..Self::default()
        };
        for r in reports {
            match r.outcome {
                SectionOutcome::Generated => stats.generated_sections += 1,
                SectionOutcome::Template => stats.template_sections += 1,
                SectionOutcome::Placeholder => stats.placeholder_sections += 1,
                SectionOutcome::Failed => stats.failed_sections += 1,
            }
        }
        stats
    }
}

/// Complete result of a successful generation run.
///
/// "Successful" means the document was composed, rendered, and stored; it
/// may still contain degraded sections — check `stats.failed_sections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SowOutput {
    /// Fresh identifier for this run; also embedded in the storage keys.
    pub request_id: String,
    /// The full composed document (canonical text form).
    pub sow_text: String,
    /// Time-limited retrieval URL for the rendered artifact.
    pub download_url: String,
    /// Blob store key of the rendered artifact (`sows/<id>.<ext>`).
    pub artifact_key: String,
    /// Blob store key of the normalized proposal snapshot (`proposals/<id>.txt`).
    pub proposal_key: String,
    pub sections: Vec<SectionReport>,
    pub stats: SowStats,
}
