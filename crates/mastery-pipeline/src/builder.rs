//! Production wiring: build a full pipeline from [`MasteryConfig`].
//!
//! Collaborators are constructed once here and shared by reference for the
//! life of the process; nothing inside the pipeline reaches for ambient
//! globals, which is what keeps the core testable against fakes.

use std::sync::Arc;

use mastery_classify::ChatClassifier;
use mastery_core::config::MasteryConfig;
use mastery_core::errors::MasteryResult;
use mastery_embeddings::{EmbeddingEngine, HttpEmbeddings};
use mastery_signals::RegexSignalExtractor;
use mastery_storage::StorageEngine;

use crate::pipeline::LearningPipeline;

impl LearningPipeline {
    /// Wire the HTTP collaborators, the cached embedder, file-backed
    /// storage, and the signal extractor from one config.
    pub fn from_config(config: &MasteryConfig) -> MasteryResult<Self> {
        let provider = Arc::new(HttpEmbeddings::new(config.embedding.clone())?);
        let embedder = Arc::new(EmbeddingEngine::new(
            provider,
            config.embedding.cache_capacity,
        ));
        let classifier = Arc::new(ChatClassifier::new(config.classifier.clone())?);
        let storage = Arc::new(StorageEngine::open(
            &config.storage.path,
            config.embedding.dimensions,
        )?);

        Ok(LearningPipeline::new(embedder, classifier, storage)
            .with_matching(config.matching.clone())
            .with_scoring(config.scoring.clone())
            .with_extractor(Arc::new(RegexSignalExtractor::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_reported_by_variable_name() {
        let mut config = MasteryConfig::default();
        config.embedding.api_key_env = "MASTERY_TEST_KEY_THAT_IS_NEVER_SET".to_string();

        let err = LearningPipeline::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("MASTERY_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
