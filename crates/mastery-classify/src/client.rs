use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mastery_core::config::ClassifierConfig;
use mastery_core::errors::{MasteryResult, OracleError};
use mastery_core::models::Classification;
use mastery_core::traits::IConceptClassifier;

use crate::parse::parse_classification;

/// Instruction the oracle gets before every message.
const SYSTEM_PROMPT: &str = "Classify the subject and name the concept.\n\
Subjects: Math, Science, English, General.\n\
Return JSON only:\n\
{ \"subject\": \"Math\", \"concept_name\": \"Linear equations\" }\n";

/// Chat-completions API request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions API response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Subject/concept classifier backed by a chat-completions oracle.
///
/// Temperature 0, message truncated to the configured char budget. Parse
/// deviations never leave this boundary (they degrade to `General`); only
/// transport failures surface as `Err`.
pub struct ChatClassifier {
    client: reqwest::Client,
    config: ClassifierConfig,
    api_key: String,
}

impl ChatClassifier {
    /// Build a classifier from config, reading the API key from the
    /// environment variable the config names.
    pub fn new(config: ClassifierConfig) -> MasteryResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| OracleError::MissingApiKey {
            var: config.api_key_env.clone(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::ClassificationFailed {
                reason: format!("client build: {e}"),
            })?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Truncate on a char boundary to the configured budget.
    fn truncate<'a>(&self, message: &'a str) -> &'a str {
        match message.char_indices().nth(self.config.max_message_chars) {
            Some((idx, _)) => &message[..idx],
            None => message,
        }
    }
}

#[async_trait]
impl IConceptClassifier for ChatClassifier {
    async fn classify(&self, message: &str) -> MasteryResult<Classification> {
        if message.trim().is_empty() {
            return Ok(Classification::general());
        }

        let request = ChatRequest {
            model: &self.config.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: self.truncate(message),
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::ClassificationFailed {
                reason: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| OracleError::ClassificationFailed {
                reason: e.to_string(),
            })?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse {
                reason: e.to_string(),
            })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        let classification = parse_classification(&content);
        debug!(
            subject = %classification.subject,
            concept = classification.concept_name.as_deref().unwrap_or("-"),
            "classified message"
        );
        Ok(classification)
    }
}
