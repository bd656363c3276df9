//! Configuration for a proposal-to-SoW run.
//!
//! All behaviour is controlled through [`SowConfig`], built via its
//! [`SowConfigBuilder`]. Keeping every knob in one struct makes it trivial to
//! share a config across requests and to diff two runs to understand why
//! their outputs differ.
//!
//! # Design choice: builder over constructor
//! A constructor with a dozen positional fields is unreadable and breaks on
//! every new field. The builder lets callers set only what they care about
//! and rely on documented defaults for the rest.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::SowError;
use crate::generator::TextGenerator;
use crate::storage::BlobStore;

/// Configuration for a SoW generation run.
///
/// Built via [`SowConfig::builder()`] or [`SowConfig::default()`].
///
/// # Example
/// ```rust
/// use sowforge::SowConfig;
///
/// let config = SowConfig::builder()
///     .bucket("sow-artifacts")
///     .concurrency(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SowConfig {
    /// Maximum tokens the backend may generate per section. Default: 500.
    ///
    /// A SoW section is a handful of paragraphs; 500 tokens covers that while
    /// keeping per-run cost predictable across ten sections.
    pub max_output_tokens: u32,

    /// Sampling temperature for the backend. Default: 0.3.
    ///
    /// Low but non-zero: contractual prose should stay close to the source
    /// proposal without reading as a verbatim copy.
    pub temperature: f32,

    /// Nucleus-sampling probability mass. Default: 0.9.
    pub top_p: f32,

    /// Maximum proposal characters embedded in each section prompt. Default: 2000.
    pub context_chars: usize,

    /// Number of concurrent backend calls across sections. Default: 4.
    ///
    /// Sections are independent, so fanning out cuts wall-clock time; the
    /// composed document is always reassembled in the fixed section order
    /// regardless of completion order. Set to 1 for fully sequential runs.
    pub concurrency: usize,

    /// Per-section backend call timeout in seconds. Default: 60.
    ///
    /// The backend is the only step that can block indefinitely; a timed-out
    /// section degrades to an inline error marker instead of hanging the run.
    pub api_timeout_secs: u64,

    /// Validity window of the presigned download URL in seconds. Default: 3600.
    pub url_ttl_secs: u64,

    /// Blob store bucket for artifacts and proposal snapshots.
    /// Ignored when `store` is set.
    pub bucket: Option<String>,

    /// Path of the compliance template file. Default: `gdpr_appendix.txt`.
    pub template_path: PathBuf,

    /// Generation backend name (e.g. "bedrock", "ollama").
    /// If None along with `generator`, the `SOWFORGE_BACKEND` env var and
    /// then the Bedrock default apply.
    pub backend_name: Option<String>,

    /// Backend model identifier, e.g. "amazon.titan-text-express-v1".
    /// If None, the backend's default model is used.
    pub model: Option<String>,

    /// Pre-constructed generation backend. Takes precedence over `backend_name`.
    pub generator: Option<Arc<dyn TextGenerator>>,

    /// Pre-constructed blob store. Takes precedence over `bucket`.
    pub store: Option<Arc<dyn BlobStore>>,
}

impl Default for SowConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 500,
            temperature: 0.3,
            top_p: 0.9,
            context_chars: 2000,
            concurrency: 4,
            api_timeout_secs: 60,
            url_ttl_secs: 3600,
            bucket: None,
            template_path: PathBuf::from("gdpr_appendix.txt"),
            backend_name: None,
            model: None,
            generator: None,
            store: None,
        }
    }
}

impl fmt::Debug for SowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SowConfig")
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("context_chars", &self.context_chars)
            .field("concurrency", &self.concurrency)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("url_ttl_secs", &self.url_ttl_secs)
            .field("bucket", &self.bucket)
            .field("template_path", &self.template_path)
            .field("backend_name", &self.backend_name)
            .field("model", &self.model)
            .field("generator", &self.generator.as_ref().map(|_| "<dyn TextGenerator>"))
            .field("store", &self.store.as_ref().map(|_| "<dyn BlobStore>"))
            .finish()
    }
}

impl SowConfig {
    /// Create a new builder for `SowConfig`.
    pub fn builder() -> SowConfigBuilder {
        SowConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SowConfig`].
#[derive(Debug)]
pub struct SowConfigBuilder {
    config: SowConfig,
}

impl SowConfigBuilder {
    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.config.max_output_tokens = n.max(1);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 1.0);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn context_chars(mut self, n: usize) -> Self {
        self.config.context_chars = n;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn url_ttl_secs(mut self, secs: u64) -> Self {
        self.config.url_ttl_secs = secs;
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.bucket = Some(bucket.into());
        self
    }

    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = path.into();
        self
    }

    pub fn backend_name(mut self, name: impl Into<String>) -> Self {
        self.config.backend_name = Some(name.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.config.generator = Some(generator);
        self
    }

    pub fn store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.config.store = Some(store);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SowConfig, SowError> {
        let c = &self.config;
        if c.context_chars == 0 {
            return Err(SowError::InvalidConfig(
                "context_chars must be ≥ 1".into(),
            ));
        }
        if c.url_ttl_secs == 0 {
            return Err(SowError::InvalidConfig(
                "url_ttl_secs must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_generation_contract() {
        let c = SowConfig::default();
        assert_eq!(c.max_output_tokens, 500);
        assert_eq!(c.temperature, 0.3);
        assert_eq!(c.top_p, 0.9);
        assert_eq!(c.context_chars, 2000);
        assert_eq!(c.url_ttl_secs, 3600);
    }

    #[test]
    fn builder_clamps_out_of_range_values() {
        let c = SowConfig::builder()
            .temperature(4.2)
            .top_p(-1.0)
            .concurrency(0)
            .build()
            .unwrap();
        assert_eq!(c.temperature, 1.0);
        assert_eq!(c.top_p, 0.0);
        assert_eq!(c.concurrency, 1);
    }

    #[test]
    fn zero_context_chars_is_rejected() {
        assert!(SowConfig::builder().context_chars(0).build().is_err());
    }
}
