//! Fakes and builders for cross-crate tests. Fakes are deterministic and
//! canned: every embedding and classification a test sees is one the test
//! scripted.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use mastery_core::cluster::{ConceptCluster, Embedding, Score, Subject};
use mastery_core::errors::{MasteryResult, OracleError};
use mastery_core::models::Classification;
use mastery_core::traits::{IConceptClassifier, IEmbeddingProvider};

/// Embedder that returns canned vectors for exact message text.
/// Unknown text is an error, so tests never embed by accident.
pub struct FakeEmbedder {
    dims: usize,
    canned: HashMap<String, Vec<f32>>,
}

impl FakeEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            canned: HashMap::new(),
        }
    }

    /// Builder-style: register a canned vector for a message.
    pub fn with(mut self, text: &str, values: Vec<f32>) -> Self {
        self.canned.insert(text.to_string(), values);
        self
    }
}

#[async_trait]
impl IEmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> MasteryResult<Embedding> {
        self.canned
            .get(text)
            .cloned()
            .map(Embedding::normalized)
            .ok_or_else(|| {
                OracleError::EmbeddingFailed {
                    reason: format!("no canned embedding for {text:?}"),
                }
                .into()
            })
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "fake-embedder"
    }
}

/// Embedder that always fails, for abort-path tests.
pub struct FailingEmbedder {
    pub dims: usize,
}

#[async_trait]
impl IEmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> MasteryResult<Embedding> {
        Err(OracleError::EmbeddingFailed {
            reason: "embedder offline".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "failing-embedder"
    }
}

/// Classifier that returns canned classifications for exact message text,
/// with a configurable default for everything else.
pub struct FakeClassifier {
    canned: HashMap<String, Classification>,
    default: Classification,
}

impl FakeClassifier {
    pub fn new() -> Self {
        Self {
            canned: HashMap::new(),
            default: Classification::general(),
        }
    }

    /// Builder-style: register a canned classification for a message.
    pub fn with(mut self, text: &str, subject: Subject, concept: Option<&str>) -> Self {
        self.canned.insert(
            text.to_string(),
            Classification {
                subject,
                concept_name: concept.map(str::to_string),
            },
        );
        self
    }
}

impl Default for FakeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IConceptClassifier for FakeClassifier {
    async fn classify(&self, message: &str) -> MasteryResult<Classification> {
        Ok(self
            .canned
            .get(message)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}

/// Classifier that always fails at the transport level, for fallback tests.
pub struct FailingClassifier;

#[async_trait]
impl IConceptClassifier for FailingClassifier {
    async fn classify(&self, _message: &str) -> MasteryResult<Classification> {
        Err(OracleError::ClassificationFailed {
            reason: "oracle offline".to_string(),
        }
        .into())
    }
}

/// Build a cluster with a given score and last-seen timestamp.
pub fn make_cluster(
    user_id: i64,
    subject: Subject,
    values: Vec<f32>,
    score: f64,
    last_seen: DateTime<Utc>,
) -> ConceptCluster {
    ConceptCluster::new(
        user_id,
        subject,
        Embedding::normalized(values),
        Some("seeded concept".to_string()),
        Score::new(score),
        last_seen,
    )
}
