//! Top-level generation entry points.
//!
//! One call drives the whole pipeline: extract → normalize → per-section
//! generation → assembly → render → store → presign. The run is a single
//! request/response flow; the only fan-out is across the ten independent
//! sections, and their results are always reassembled in the fixed table
//! order, never completion order.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SowConfig;
use crate::error::SowError;
use crate::generator::{OllamaGenerator, TextGenerator, TitanGenerator};
use crate::output::{SectionReport, SowOutput, SowStats};
use crate::pipeline::render::{self, OutputFormat};
use crate::pipeline::{extract, normalize, section};
use crate::prompts::DOC_TITLE;
use crate::sections::SOW_SECTIONS;
use crate::storage::{BlobStore, S3BlobStore};

/// Generate a Statement of Work from a proposal file.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input` — Local path to the proposal (pdf, docx, pptx, xlsx, or plain text)
/// * `format` — Output encoding for the stored artifact
/// * `config` — Run configuration
///
/// # Returns
/// `Ok(SowOutput)` on success, even if some sections degraded to inline
/// error markers (check `output.stats.failed_sections`).
///
/// # Errors
/// Returns `Err(SowError)` only for whole-request failures:
/// - The per-format reader cannot extract text
/// - Nothing is left after cleanup
/// - Rendering or storage fails
pub async fn generate_sow(
    input: impl AsRef<Path>,
    format: OutputFormat,
    config: &SowConfig,
) -> Result<SowOutput, SowError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    let request_id = Uuid::new_v4().to_string();
    info!("Starting SoW generation for {} [{}]", input.display(), request_id);

    // ── Step 1: Extract raw text ─────────────────────────────────────────
    // The readers are synchronous and CPU/IO-bound; keep them off the
    // async executor's hot path.
    let path = input.to_path_buf();
    let raw = tokio::task::spawn_blocking(move || extract::extract_text(&path))
        .await
        .map_err(|e| SowError::Internal(format!("extraction task: {e}")))?
        .map_err(|e| SowError::Extraction {
            path: input.to_path_buf(),
            detail: e.to_string(),
        })?;

    // ── Step 2: Normalize ────────────────────────────────────────────────
    // Fail fast on an empty proposal so no backend or storage call is wasted.
    let proposal = normalize::clean_proposal_text(&raw);
    if proposal.is_empty() {
        return Err(SowError::EmptyProposal);
    }
    debug!("Proposal text: {} chars after cleanup", proposal.len());

    // ── Step 3: Resolve collaborators ────────────────────────────────────
    let generator = resolve_generator(config).await?;
    let store = resolve_store(config).await?;

    // ── Step 4: Generate sections ────────────────────────────────────────
    let generation_start = Instant::now();
    let mut reports: Vec<SectionReport> = stream::iter(
        SOW_SECTIONS.iter().enumerate().map(|(idx, spec)| {
            let generator = Arc::clone(&generator);
            let proposal = proposal.as_str();
            async move {
                section::generate_section(&generator, idx, spec, proposal, config).await
            }
        }),
    )
    .buffer_unordered(config.concurrency)
    .collect()
    .await;
    let generation_duration_ms = generation_start.elapsed().as_millis() as u64;

    // Completion order is arbitrary under fan-out; the document order is not.
    reports.sort_by_key(|r| r.index);

    // ── Step 5: Assemble ─────────────────────────────────────────────────
    let sow_text = assemble(&reports);

    // ── Step 6: Render ───────────────────────────────────────────────────
    let artifact = render::render(&sow_text, format)?;

    // ── Step 7: Store artifact + proposal snapshot, mint URL ─────────────
    let artifact_key = format!("sows/{}.{}", request_id, format.extension());
    let proposal_key = format!("proposals/{}.txt", request_id);

    store.put(&artifact_key, artifact).await?;
    store.put(&proposal_key, proposal.into_bytes()).await?;

    let download_url = store
        .presign_get(&artifact_key, Duration::from_secs(config.url_ttl_secs))
        .await?;

    // ── Step 8: Stats ────────────────────────────────────────────────────
    let mut stats = SowStats::tally(&reports);
    stats.generation_duration_ms = generation_duration_ms;
    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "SoW complete [{}]: {}/{} sections generated, {} degraded, {}ms total",
        request_id,
        stats.generated_sections,
        stats.total_sections,
        stats.failed_sections,
        stats.total_duration_ms
    );

    Ok(SowOutput {
        request_id,
        sow_text,
        download_url,
        artifact_key,
        proposal_key,
        sections: reports,
        stats,
    })
}

/// Generate a SoW from in-memory proposal bytes.
///
/// The extraction readers dispatch on file extension, so the caller passes
/// the original upload's extension (e.g. `"pdf"`). The bytes are written to
/// a managed [`tempfile`] whose removal is guaranteed on every exit path,
/// including errors and panics.
pub async fn generate_sow_from_bytes(
    bytes: &[u8],
    extension: &str,
    format: OutputFormat,
    config: &SowConfig,
) -> Result<SowOutput, SowError> {
    let mut tmp = tempfile::Builder::new()
        .suffix(&format!(".{}", extension.trim_start_matches('.')))
        .tempfile()
        .map_err(|e| SowError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(bytes)
        .map_err(|e| SowError::Internal(format!("tempfile write: {e}")))?;

    // `tmp` is dropped (and the file deleted) when `generate_sow` returns
    generate_sow(tmp.path(), format, config).await
}

/// Assemble the composed document from the per-section reports.
///
/// The output shape is the contract every renderer parses back apart:
/// title line, blank line, then `"### " + title + "\n\n" + body` per
/// section, sections joined by a blank line. Failed sections surface here
/// as their inline error markers.
pub fn assemble(reports: &[SectionReport]) -> String {
    let sections: Vec<String> = reports
        .iter()
        .map(|r| format!("### {}\n\n{}", r.title, r.display_body()))
        .collect();

    format!("{}\n\n{}", DOC_TITLE, sections.join("\n\n"))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Resolve the generation backend, from most-specific to least-specific.
///
/// 1. **Pre-built handle** (`config.generator`) — the caller constructed the
///    backend entirely; used as-is. This is how tests inject mocks.
/// 2. **Configured name** (`config.backend_name`) — e.g. "bedrock", "ollama".
/// 3. **`SOWFORGE_BACKEND` env var** — same names, set at the execution
///    environment level.
/// 4. **Default** — Bedrock Titan from the ambient AWS environment.
async fn resolve_generator(config: &SowConfig) -> Result<Arc<dyn TextGenerator>, SowError> {
    if let Some(ref generator) = config.generator {
        return Ok(Arc::clone(generator));
    }

    let name = config
        .backend_name
        .clone()
        .or_else(|| std::env::var("SOWFORGE_BACKEND").ok())
        .unwrap_or_else(|| "bedrock".to_string());

    match name.as_str() {
        "bedrock" | "titan" => Ok(Arc::new(
            TitanGenerator::from_env(config.model.as_deref()).await,
        )),
        "ollama" => Ok(Arc::new(OllamaGenerator::from_env(config.model.as_deref()))),
        other => Err(SowError::BackendNotConfigured {
            backend: other.to_string(),
            hint: "Supported backends: bedrock, ollama.\n\
                   Inject a custom backend via SowConfig::builder().generator(...)."
                .to_string(),
        }),
    }
}

/// Resolve the blob store: injected handle, else S3 against the configured
/// bucket (`config.bucket` or `SOWFORGE_BUCKET`).
async fn resolve_store(config: &SowConfig) -> Result<Arc<dyn BlobStore>, SowError> {
    if let Some(ref store) = config.store {
        return Ok(Arc::clone(store));
    }

    let bucket = config
        .bucket
        .clone()
        .or_else(|| std::env::var("SOWFORGE_BUCKET").ok())
        .ok_or_else(|| {
            SowError::Storage(crate::storage::StorageError::NotConfigured(
                "set SowConfig.bucket, SOWFORGE_BUCKET, or inject a store".to_string(),
            ))
        })?;

    Ok(Arc::new(S3BlobStore::from_env(bucket).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SectionError;
    use crate::output::SectionOutcome;

    fn report(index: usize, title: &str, body: &str) -> SectionReport {
        SectionReport {
            index,
            title: title.to_string(),
            outcome: SectionOutcome::Generated,
            body: body.to_string(),
            error: None,
            duration_ms: 0,
        }
    }

    #[test]
    fn assemble_matches_canonical_shape() {
        let reports = vec![
            report(0, "DURATION", " Six months. "),
            report(1, "SIGN-OFF SECTION", "Signatures below."),
        ];
        let composed = assemble(&reports);
        assert_eq!(
            composed,
            "**Statement of Work for [Project Title]**\n\n\
### DURATION\n\nSix months.\n\n\
### SIGN-OFF SECTION\n\nSignatures below."
        );
    }

    #[test]
    fn assemble_inlines_failed_sections() {
        let mut failed = report(0, "DURATION", "");
        failed.outcome = SectionOutcome::Failed;
        failed.error = Some(SectionError::Backend {
            section: "DURATION".into(),
            detail: "timeout".into(),
        });

        let composed = assemble(&[failed]);
        assert!(composed.contains("### DURATION\n\n[ERROR generating section: timeout]"));
    }

    #[test]
    fn assemble_round_trips_through_section_split() {
        let reports: Vec<SectionReport> = SOW_SECTIONS
            .iter()
            .enumerate()
            .map(|(i, s)| report(i, s.title, "Body text."))
            .collect();

        let composed = assemble(&reports);
        let parsed = crate::pipeline::render::split_sections(&composed);
        assert_eq!(parsed.len(), SOW_SECTIONS.len());
        for (section, spec) in parsed.iter().zip(SOW_SECTIONS.iter()) {
            assert_eq!(section.title, spec.title);
        }
    }
}
