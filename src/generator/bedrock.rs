//! AWS Bedrock Titan text backend.
//!
//! Uses the raw `invoke_model` API with the Titan request envelope rather
//! than the Converse API: Titan Express is the cheapest text model on
//! Bedrock and its native envelope exposes exactly the three sampling knobs
//! the pipeline cares about.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde_json::json;
use tracing::debug;

use super::{GenerationRequest, GeneratorError, TextGenerator};

/// Default Bedrock model when none is configured.
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";

pub struct TitanGenerator {
    client: Client,
    model_id: String,
}

impl TitanGenerator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Construct a client from the ambient AWS environment
    /// (credentials chain, `AWS_REGION`, etc.).
    pub async fn from_env(model_id: Option<&str>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(
            Client::new(&config),
            model_id.unwrap_or(DEFAULT_MODEL_ID),
        )
    }
}

#[async_trait]
impl TextGenerator for TitanGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let body = json!({
            "inputText": request.prompt,
            "textGenerationConfig": {
                "maxTokenCount": request.max_tokens,
                "temperature": request.temperature,
                "topP": request.top_p,
            }
        });

        debug!("Bedrock invoke_model: {}", self.model_id);

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(
                serde_json::to_vec(&body).map_err(|e| GeneratorError::Parse(e.to_string()))?,
            ))
            .send()
            .await
            .map_err(|e| GeneratorError::Backend(e.to_string()))?;

        let payload: serde_json::Value = serde_json::from_slice(response.body().as_ref())
            .map_err(|e| GeneratorError::Parse(e.to_string()))?;

        let text = payload["results"][0]["outputText"]
            .as_str()
            .ok_or_else(|| GeneratorError::Parse("missing results[0].outputText".into()))?;

        Ok(text.trim().to_string())
    }
}
