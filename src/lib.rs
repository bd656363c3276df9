//! # sowforge
//!
//! Generate structured Statements of Work from unstructured sales proposals
//! using a generative text backend.
//!
//! ## Why this crate?
//!
//! Turning a proposal into a SoW is rote work with a fixed shape: the same
//! ten sections, in the same order, each summarising a slice of the proposal
//! in contractual language. This crate automates the rote part — it extracts
//! the proposal text, cleans it, drives one bounded backend call per section
//! that warrants one, and serialises the result into whichever format the
//! recipient expects.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Proposal (pdf/docx/pptx/xlsx/txt)
//!  │
//!  ├─ 1. Extract    per-format readers → raw text
//!  ├─ 2. Normalize  strip boilerplate, collapse whitespace
//!  ├─ 3. Sections   10 fixed sections: template / placeholder / generated
//!  ├─ 4. Assemble   canonical "### "-delimited composed document
//!  ├─ 5. Render     txt · docx · pptx · xlsx · pdf
//!  └─ 6. Store      blob store upload + presigned download URL
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sowforge::{generate_sow, OutputFormat, SowConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Backend auto-resolves to Bedrock Titan from the AWS environment.
//!     let config = SowConfig::builder().bucket("sow-artifacts").build()?;
//!     let output = generate_sow("proposal.pdf", OutputFormat::Pdf, &config).await?;
//!     println!("{}", output.download_url);
//!     eprintln!(
//!         "{} of {} sections generated",
//!         output.stats.generated_sections, output.stats.total_sections
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Degraded sections
//!
//! A failed backend call never aborts the run: the affected section carries
//! an inline `[ERROR generating section: …]` marker and a structured
//! [`SectionError`] on its report, while the other sections complete
//! normally. Only extraction, empty-proposal, render, and storage failures
//! fail the whole request.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sowforge` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod generator;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod sections;
pub mod storage;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SowConfig, SowConfigBuilder};
pub use error::{SectionError, SowError};
pub use generate::{assemble, generate_sow, generate_sow_from_bytes};
pub use generator::{GenerationRequest, GeneratorError, MockGenerator, TextGenerator};
pub use output::{SectionOutcome, SectionReport, SowOutput, SowStats};
pub use pipeline::render::OutputFormat;
pub use sections::{SectionPolicy, SectionSpec, SOW_SECTIONS};
pub use storage::{BlobStore, MemoryStore, S3BlobStore, StorageError};
