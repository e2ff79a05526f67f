use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mastery_core::cluster::Embedding;
use mastery_core::config::EmbeddingConfig;
use mastery_core::errors::{MasteryResult, OracleError};
use mastery_core::traits::IEmbeddingProvider;

/// Embeddings API request format.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Embeddings API response format.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// HTTP embedding provider speaking the OpenAI `/embeddings` wire shape.
///
/// Stateless per call; one instance is shared across every concurrent
/// pipeline invocation. Any transport or format failure is an error,
/// never a zero vector.
pub struct HttpEmbeddings {
    client: reqwest::Client,
    config: EmbeddingConfig,
    api_key: String,
}

impl HttpEmbeddings {
    /// Build a provider from config, reading the API key from the
    /// environment variable the config names.
    pub fn new(config: EmbeddingConfig) -> MasteryResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| OracleError::MissingApiKey {
            var: config.api_key_env.clone(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::EmbeddingFailed {
                reason: format!("client build: {e}"),
            })?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl IEmbeddingProvider for HttpEmbeddings {
    async fn embed(&self, text: &str) -> MasteryResult<Embedding> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::EmbeddingFailed {
                reason: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| OracleError::EmbeddingFailed {
                reason: e.to_string(),
            })?;

        let body: EmbeddingResponse =
            response
                .json()
                .await
                .map_err(|e| OracleError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let datum = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| OracleError::MalformedResponse {
                reason: "empty data array".to_string(),
            })?;

        if datum.embedding.len() != self.config.dimensions {
            return Err(OracleError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: datum.embedding.len(),
            }
            .into());
        }

        Ok(Embedding::normalized(datum.embedding))
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "http-embeddings"
    }
}
