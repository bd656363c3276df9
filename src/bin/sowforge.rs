//! CLI binary for sowforge.
//!
//! A thin shim over the library crate that maps CLI flags to `SowConfig`
//! and prints the preview, download URL, and run stats.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sowforge::{generate_sow, OutputFormat, SowConfig};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// Inline preview length, matching what upload front ends typically show.
const PREVIEW_CHARS: usize = 5000;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate a PDF SoW from a proposal
  sowforge proposal.pdf --bucket sow-artifacts

  # Word output from a slide deck, 2-hour download link
  sowforge pitch.pptx -f docx --bucket sow-artifacts --ttl 7200

  # Local backend, no AWS account needed for generation
  sowforge proposal.txt --backend ollama --model llama3 --bucket sow-artifacts

  # Structured JSON report of the whole run
  sowforge proposal.docx --json --bucket sow-artifacts > run.json

SUPPORTED BACKENDS:
  bedrock   Amazon Bedrock, amazon.titan-text-express-v1 by default
  ollama    Local Ollama endpoint (OLLAMA_HOST, default http://localhost:11434)

ENVIRONMENT VARIABLES:
  SOWFORGE_BACKEND   Backend name when --backend is not given
  SOWFORGE_BUCKET    Artifact bucket when --bucket is not given
  SOWFORGE_MODEL     Model ID override
  OLLAMA_HOST        Ollama endpoint for --backend ollama
  AWS_*              Standard AWS credential/region chain for bedrock + S3

SETUP:
  1. Configure AWS credentials (or run Ollama locally).
  2. sowforge proposal.pdf --bucket your-bucket
"#;

/// Generate Statements of Work from sales proposals.
#[derive(Parser, Debug)]
#[command(
    name = "sowforge",
    version,
    about = "Generate Statements of Work from sales proposals",
    long_about = "Extract text from a proposal (PDF, DOCX, PPTX, XLSX, or plain text), \
generate the ten canonical SoW sections with a text backend, and store the result \
as txt, docx, pptx, xlsx, or pdf with a presigned download link.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the proposal file.
    input: PathBuf,

    /// Output format: txt, docx, pptx, xlsx, pdf.
    #[arg(short, long, env = "SOWFORGE_FORMAT", default_value = "txt")]
    format: String,

    /// Blob store bucket for the artifact and proposal snapshot.
    #[arg(long, env = "SOWFORGE_BUCKET")]
    bucket: Option<String>,

    /// Generation backend: bedrock, ollama.
    #[arg(long, env = "SOWFORGE_BACKEND")]
    backend: Option<String>,

    /// Backend model ID (e.g. amazon.titan-text-express-v1, llama3).
    #[arg(long, env = "SOWFORGE_MODEL")]
    model: Option<String>,

    /// Path of the compliance template file.
    #[arg(long, env = "SOWFORGE_TEMPLATE")]
    template: Option<PathBuf>,

    /// Download URL validity in seconds.
    #[arg(long, env = "SOWFORGE_TTL", default_value_t = 3600)]
    ttl: u64,

    /// Max backend output tokens per section.
    #[arg(long, env = "SOWFORGE_MAX_TOKENS", default_value_t = 500)]
    max_tokens: u32,

    /// Backend sampling temperature (0.0–1.0).
    #[arg(long, env = "SOWFORGE_TEMPERATURE", default_value_t = 0.3)]
    temperature: f32,

    /// Nucleus-sampling probability mass (0.0–1.0).
    #[arg(long, env = "SOWFORGE_TOP_P", default_value_t = 0.9)]
    top_p: f32,

    /// Concurrent backend calls across sections.
    #[arg(short, long, env = "SOWFORGE_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Per-section backend timeout in seconds.
    #[arg(long, env = "SOWFORGE_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Output the structured run report (SowOutput) as JSON.
    #[arg(long, env = "SOWFORGE_JSON")]
    json: bool,

    /// Suppress the inline preview (URL and summary only).
    #[arg(long)]
    no_preview: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SOWFORGE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the URL.
    #[arg(short, long, env = "SOWFORGE_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let format: OutputFormat = cli.format.parse().context("Invalid output format")?;
    let config = build_config(&cli)?;

    // ── Run ──────────────────────────────────────────────────────────────
    let output = generate_sow(&cli.input, format, &config)
        .await
        .context("SoW generation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet && !cli.no_preview {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let preview: String = output.sow_text.chars().take(PREVIEW_CHARS).collect();
        handle.write_all(preview.as_bytes())?;
        if output.sow_text.chars().count() > PREVIEW_CHARS {
            handle.write_all("…".as_bytes())?;
        }
        handle.write_all(b"\n")?;
    }

    println!("{}", output.download_url);

    if !cli.quiet {
        let s = &output.stats;
        eprintln!(
            "{} {} sections  {}  {}",
            if s.failed_sections == 0 {
                green("✔")
            } else {
                cyan("⚠")
            },
            bold(&s.total_sections.to_string()),
            dim(&format!(
                "{} generated / {} template / {} placeholder / {} failed",
                s.generated_sections,
                s.template_sections,
                s.placeholder_sections,
                s.failed_sections
            )),
            dim(&format!("{}ms", s.total_duration_ms)),
        );
        eprintln!(
            "   {}  {}",
            dim(&output.artifact_key),
            dim(&format!("link valid {}s", cli.ttl)),
        );
    }

    Ok(())
}

/// Map CLI args to `SowConfig`.
fn build_config(cli: &Cli) -> Result<SowConfig> {
    let mut builder = SowConfig::builder()
        .max_output_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .top_p(cli.top_p)
        .concurrency(cli.concurrency)
        .api_timeout_secs(cli.api_timeout)
        .url_ttl_secs(cli.ttl);

    if let Some(ref bucket) = cli.bucket {
        builder = builder.bucket(bucket);
    }
    if let Some(ref backend) = cli.backend {
        builder = builder.backend_name(backend);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref template) = cli.template {
        builder = builder.template_path(template);
    }

    builder.build().context("Invalid configuration")
}
