//! Generation backend abstraction.
//!
//! The pipeline only needs one call: prompt in, generated text out, with
//! bounded sampling parameters. Everything provider-specific (endpoints,
//! auth, request envelopes) lives behind [`TextGenerator`] so the section
//! generator can be tested with a mock and so backends can be swapped
//! without touching pipeline code.

use async_trait::async_trait;

pub mod bedrock;
pub mod mock;
pub mod ollama;

pub use bedrock::TitanGenerator;
pub use mock::MockGenerator;
pub use ollama::OllamaGenerator;

/// One bounded generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Maximum output tokens the backend may produce.
    pub max_tokens: u32,
    pub temperature: f32,
    /// Nucleus-sampling probability mass.
    pub top_p: f32,
}

/// Trait for generation backends — each provider implements this.
///
/// Implementations must be safe for concurrent use by independent requests;
/// the pipeline shares one handle across its section fan-out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single completion request and return the generated text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("backend not configured: {0}")]
    NotConfigured(String),
}
