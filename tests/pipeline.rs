//! End-to-end pipeline tests for sowforge.
//!
//! Every test runs against the in-process `MockGenerator` and `MemoryStore`,
//! so the whole suite is hermetic: no AWS account, no local model server.
//! Rendered artifacts are read back with the same reader crates the
//! extraction stage uses, which keeps the byte-format assertions honest.

use std::io::Write;
use std::sync::Arc;

use sowforge::{
    generate_sow, generate_sow_from_bytes, MemoryStore, MockGenerator, OutputFormat, SowConfig,
    SowError, SectionOutcome, TextGenerator, SOW_SECTIONS,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

const PROPOSAL: &str = "The engagement has a duration of six months with a clear timeline. \
Scope covers migration services and deliverables for all phases. \
Acceptance criteria are agreed up front. Governance reviews run monthly. \
The team roles span two locations. Cost is fixed with milestone payments. \
Assumptions are listed below. A signature block closes the agreement.";

fn proposal_file(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

struct Harness {
    generator: Arc<MockGenerator>,
    store: Arc<MemoryStore>,
    config: SowConfig,
}

fn harness(generator: MockGenerator) -> Harness {
    let generator = Arc::new(generator);
    let store = Arc::new(MemoryStore::new());
    let config = SowConfig::builder()
        .generator(Arc::clone(&generator) as Arc<dyn TextGenerator>)
        .store(Arc::clone(&store) as Arc<dyn sowforge::BlobStore>)
        .template_path("/definitely/missing/gdpr_appendix.txt")
        .build()
        .unwrap();
    Harness {
        generator,
        store,
        config,
    }
}

// ── Full-run shape ───────────────────────────────────────────────────────────

#[tokio::test]
async fn run_yields_ten_sections_in_canonical_order() {
    let h = harness(MockGenerator::new("Generated body."));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Txt, &h.config)
        .await
        .expect("run must succeed");

    assert_eq!(output.sections.len(), 10);
    for (report, spec) in output.sections.iter().zip(SOW_SECTIONS.iter()) {
        assert_eq!(report.title, spec.title);
    }

    // The composed document leads with the fixed title line and carries one
    // heading per section, in order.
    assert!(output
        .sow_text
        .starts_with("**Statement of Work for [Project Title]**\n\n"));
    let mut cursor = 0;
    for spec in &SOW_SECTIONS {
        let heading = format!("### {}", spec.title);
        let pos = output.sow_text[cursor..]
            .find(&heading)
            .unwrap_or_else(|| panic!("missing heading {heading:?}"));
        cursor += pos + heading.len();
    }
}

#[tokio::test]
async fn artifact_and_proposal_snapshot_are_stored() {
    let h = harness(MockGenerator::new("Generated body."));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Txt, &h.config)
        .await
        .unwrap();

    assert_eq!(output.artifact_key, format!("sows/{}.txt", output.request_id));
    assert_eq!(
        output.proposal_key,
        format!("proposals/{}.txt", output.request_id)
    );
    assert_eq!(h.store.keys().len(), 2);

    // txt artifact round-trips the composed document exactly.
    let stored = h.store.get(&output.artifact_key).unwrap();
    assert_eq!(String::from_utf8(stored).unwrap(), output.sow_text);

    // The proposal snapshot is the normalized text, not the raw upload.
    let snapshot = h.store.get(&output.proposal_key).unwrap();
    let snapshot = String::from_utf8(snapshot).unwrap();
    assert!(snapshot.contains("duration of six months"));
    assert!(!snapshot.contains("\n\n"));

    assert!(output.download_url.contains(&output.artifact_key));
    assert!(output.download_url.contains("expires=3600"));
}

// ── Policy routing ───────────────────────────────────────────────────────────

#[tokio::test]
async fn template_section_skips_backend_and_uses_fallback() {
    let h = harness(MockGenerator::new("Generated body."));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Txt, &h.config)
        .await
        .unwrap();

    let gdpr = output
        .sections
        .iter()
        .find(|r| r.title.contains("GDPR"))
        .unwrap();
    assert_eq!(gdpr.outcome, SectionOutcome::Template);
    assert_eq!(
        gdpr.body,
        "Standard GDPR compliance policies will be added during the final contracting stage."
    );

    // All nine non-template sections had keywords present, so the backend
    // was called exactly nine times.
    assert_eq!(h.generator.call_count(), 9);
}

#[tokio::test]
async fn template_file_contents_are_used_verbatim() {
    let mut template = tempfile::NamedTempFile::new().unwrap();
    template
        .write_all(b"Data is processed under the DPA in appendix C.\n")
        .unwrap();

    let generator = Arc::new(MockGenerator::new("Generated body."));
    let store = Arc::new(MemoryStore::new());
    let config = SowConfig::builder()
        .generator(Arc::clone(&generator) as Arc<dyn TextGenerator>)
        .store(Arc::clone(&store) as Arc<dyn sowforge::BlobStore>)
        .template_path(template.path())
        .build()
        .unwrap();

    let f = proposal_file(PROPOSAL);
    let output = generate_sow(f.path(), OutputFormat::Txt, &config).await.unwrap();

    let gdpr = output
        .sections
        .iter()
        .find(|r| r.title.contains("GDPR"))
        .unwrap();
    assert_eq!(gdpr.body, "Data is processed under the DPA in appendix C.");
}

#[tokio::test]
async fn keyword_misses_emit_placeholder_without_backend_calls() {
    let h = harness(MockGenerator::new("Generated body."));
    // Proposal that only mentions cost-related words: every other gated
    // section misses its keywords.
    let f = proposal_file("The total cost is fixed at a price of 100k.");

    let output = generate_sow(f.path(), OutputFormat::Txt, &h.config)
        .await
        .unwrap();

    let placeholders = output
        .sections
        .iter()
        .filter(|r| r.outcome == SectionOutcome::Placeholder)
        .count();
    assert_eq!(placeholders, 8);

    for r in &output.sections {
        if r.outcome == SectionOutcome::Placeholder {
            assert_eq!(r.body, "To be defined during project discovery.");
        }
    }

    // Only COMMERCIALS AND PAYMENT SCHEDULE hit its keywords.
    assert_eq!(h.generator.call_count(), 1);
    assert_eq!(output.stats.generated_sections, 1);
    assert_eq!(output.stats.template_sections, 1);
    assert_eq!(output.stats.placeholder_sections, 8);
}

// ── Failure containment ──────────────────────────────────────────────────────

#[tokio::test]
async fn empty_proposal_fails_before_backend_and_storage() {
    let h = harness(MockGenerator::new("Generated body."));
    // Nothing but boilerplate and whitespace survives normalization.
    let f = proposal_file("Executive Summary\n\n   \n");

    let err = generate_sow(f.path(), OutputFormat::Txt, &h.config)
        .await
        .unwrap_err();

    assert!(matches!(err, SowError::EmptyProposal));
    assert_eq!(h.generator.call_count(), 0);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn one_failed_section_degrades_without_aborting() {
    let h = harness(
        MockGenerator::new("Generated body.").failing_on("ACCEPTANCE CRITERIA", "timeout"),
    );
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Txt, &h.config)
        .await
        .expect("a single section failure must not fail the run");

    let failed = output
        .sections
        .iter()
        .find(|r| r.title == "ACCEPTANCE CRITERIA")
        .unwrap();
    assert_eq!(failed.outcome, SectionOutcome::Failed);
    assert!(failed.error.is_some());
    assert!(output
        .sow_text
        .contains("### ACCEPTANCE CRITERIA\n\n[ERROR generating section:"));
    assert!(output.sow_text.contains("timeout"));

    // The other eight generated sections are intact and the artifact was
    // still stored with a URL minted.
    assert_eq!(output.stats.generated_sections, 8);
    assert_eq!(output.stats.failed_sections, 1);
    assert_eq!(h.store.keys().len(), 2);
    assert!(!output.download_url.is_empty());
}

// ── Byte-format artifacts ────────────────────────────────────────────────────

#[tokio::test]
async fn xlsx_artifact_rows_split_on_first_colon_space() {
    use calamine::{Data, Reader, Xlsx};

    let h = harness(MockGenerator::new("Cost: $10,000\nGeneral notes"));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Xlsx, &h.config)
        .await
        .unwrap();
    assert_eq!(output.artifact_key, format!("sows/{}.xlsx", output.request_id));

    let bytes = h.store.get(&output.artifact_key).unwrap();
    let mut workbook = Xlsx::new(std::io::Cursor::new(bytes)).unwrap();
    let sheet = workbook.sheet_names().first().unwrap().to_owned();
    let range = workbook.worksheet_range(&sheet).unwrap();

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|c| match c {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();

    assert_eq!(rows[0], vec!["Section".to_string(), "Content".to_string()]);
    assert!(rows.contains(&vec!["Cost".to_string(), "$10,000".to_string()]));
    assert!(rows.contains(&vec!["General notes".to_string(), String::new()]));
}

#[tokio::test]
async fn docx_artifact_parses_back_with_section_headings() {
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

    let h = harness(MockGenerator::new("Generated body."));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Docx, &h.config)
        .await
        .unwrap();

    let bytes = h.store.get(&output.artifact_key).unwrap();
    let docx = read_docx(&bytes).expect("artifact must be a valid docx");

    let mut texts: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                RunChild::Text(t) => Some(t.text.clone()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(""),
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("");
            texts.push(text);
        }
    }

    assert_eq!(texts[0], "Statement of Work for [Project Title]");
    assert!(texts.contains(&"DURATION".to_string()));
    assert!(texts.contains(&"Generated body.".to_string()));
}

#[tokio::test]
async fn pptx_artifact_has_one_slide_per_section() {
    let h = harness(MockGenerator::new("Generated body."));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Pptx, &h.config)
        .await
        .unwrap();

    let bytes = h.store.get(&output.artifact_key).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let slides = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count();
    assert_eq!(slides, 10);
}

#[tokio::test]
async fn pdf_artifact_has_pdf_magic() {
    let h = harness(MockGenerator::new("Generated body."));
    let f = proposal_file(PROPOSAL);

    let output = generate_sow(f.path(), OutputFormat::Pdf, &h.config)
        .await
        .unwrap();

    let bytes = h.store.get(&output.artifact_key).unwrap();
    assert_eq!(&bytes[..5], b"%PDF-");
}

// ── Bytes entry point ────────────────────────────────────────────────────────

#[tokio::test]
async fn bytes_entry_point_matches_file_entry_point() {
    let h = harness(MockGenerator::new("Generated body."));

    let output = generate_sow_from_bytes(PROPOSAL.as_bytes(), "txt", OutputFormat::Txt, &h.config)
        .await
        .expect("bytes entry point must succeed");

    assert_eq!(output.sections.len(), 10);
    assert_eq!(h.store.keys().len(), 2);
}

#[tokio::test]
async fn concurrent_fan_out_preserves_section_order() {
    let generator = Arc::new(MockGenerator::new("Generated body."));
    let store = Arc::new(MemoryStore::new());
    let config = SowConfig::builder()
        .generator(Arc::clone(&generator) as Arc<dyn TextGenerator>)
        .store(Arc::clone(&store) as Arc<dyn sowforge::BlobStore>)
        .template_path("/definitely/missing/gdpr_appendix.txt")
        .concurrency(10)
        .build()
        .unwrap();

    let f = proposal_file(PROPOSAL);
    let output = generate_sow(f.path(), OutputFormat::Txt, &config).await.unwrap();

    for (i, report) in output.sections.iter().enumerate() {
        assert_eq!(report.index, i);
        assert_eq!(report.title, SOW_SECTIONS[i].title);
    }
}
