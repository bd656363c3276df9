//! Error types for the sowforge library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SowError`] — **Fatal**: the request cannot produce a document at all
//!   (unreadable input file, nothing left after cleanup, renderer or blob
//!   store failure). Returned as `Err(SowError)` from the top-level
//!   `generate_sow*` functions.
//!
//! * [`SectionError`] — **Non-fatal**: the generation backend failed for a
//!   single section but the other nine are fine. Stored inside
//!   [`crate::output::SectionReport`] and rendered as visible inline text in
//!   that section's body, so one bad backend call never loses the document.
//!
//! Template-file read failures are not an error at all: the section falls
//! back to a canned sentence and the run continues.

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::render::OutputFormat;

/// All fatal errors returned by the sowforge library.
///
/// Per-section backend failures use [`SectionError`] and are stored in
/// [`crate::output::SectionReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum SowError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The per-format reader could not extract text from the input file.
    #[error("failed to extract text from '{path}': {detail}")]
    Extraction { path: PathBuf, detail: String },

    /// Nothing usable was left after boilerplate cleanup.
    ///
    /// Raised before any backend or storage call so an empty upload never
    /// burns generation quota.
    #[error("no valid proposal text extracted — the document is empty after cleanup")]
    EmptyProposal,

    /// The requested output format string is not one of txt/docx/pptx/xlsx/pdf.
    #[error("unknown output format '{0}' (expected txt, docx, pptx, xlsx, or pdf)")]
    UnknownFormat(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Serialising the composed document into the requested format failed.
    #[error("rendering {format} output failed: {detail}")]
    Render { format: OutputFormat, detail: String },

    /// Upload or presigning against the blob store failed.
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),

    // ── Configuration errors ──────────────────────────────────────────────
    /// The configured generation backend could not be constructed.
    #[error("generation backend '{backend}' is not configured.\n{hint}")]
    BackendNotConfigured { backend: String, hint: String },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single SoW section.
///
/// Stored on [`crate::output::SectionReport`] when the backend call for that
/// section fails. The overall run always completes; assembly turns this into
/// the inline marker `[ERROR generating section: …]`.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum SectionError {
    /// The generation backend returned an error.
    #[error("section '{section}': backend call failed: {detail}")]
    Backend { section: String, detail: String },

    /// The generation backend did not answer within the configured timeout.
    #[error("section '{section}': backend call timed out after {secs}s")]
    Timeout { section: String, secs: u64 },
}

impl SectionError {
    /// The failure reason embedded in the inline error marker.
    pub fn reason(&self) -> String {
        match self {
            SectionError::Backend { detail, .. } => detail.clone(),
            SectionError::Timeout { secs, .. } => format!("timed out after {secs}s"),
        }
    }
}
