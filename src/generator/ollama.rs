//! Local Ollama backend for offline runs and development.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{GenerationRequest, GeneratorError, TextGenerator};

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "llama3";

pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Construct from `OLLAMA_HOST` (default `http://localhost:11434`).
    pub fn from_env(model: Option<&str>) -> Self {
        let host =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost:11434".to_string());
        Self::new(host, model.unwrap_or(DEFAULT_MODEL))
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let url = format!("{}/api/generate", self.base_url);

        let body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "top_p": request.top_p,
                "num_predict": request.max_tokens,
            },
        });

        debug!("Ollama request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["response"]
            .as_str()
            .ok_or_else(|| GeneratorError::Parse("missing response field".into()))?
            .trim()
            .to_string();

        Ok(content)
    }
}
