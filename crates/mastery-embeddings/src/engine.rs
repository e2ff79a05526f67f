//! EmbeddingEngine — provider wrapper with a content-hash cache.
//!
//! Chat users restate the same question often; the cache turns those
//! repeats into lookups keyed by a blake3 hash of the exact text.

use std::sync::Arc;

use async_trait::async_trait;
use moka::sync::Cache;
use tracing::{debug, info};

use mastery_core::cluster::Embedding;
use mastery_core::errors::MasteryResult;
use mastery_core::traits::IEmbeddingProvider;

/// Caching front for any embedding provider. Implements
/// `IEmbeddingProvider` itself, so it drops in wherever a provider goes.
pub struct EmbeddingEngine {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Embedding>,
}

impl EmbeddingEngine {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, cache_capacity: u64) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            cache_capacity,
            "embedding engine initialized"
        );
        Self {
            provider,
            cache: Cache::new(cache_capacity),
        }
    }

    fn content_key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }
}

#[async_trait]
impl IEmbeddingProvider for EmbeddingEngine {
    async fn embed(&self, text: &str) -> MasteryResult<Embedding> {
        let key = Self::content_key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return Ok(hit);
        }

        // Errors are not cached; a transient failure should not poison
        // future lookups of the same text.
        let embedding = self.provider.embed(text).await?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mastery_core::errors::OracleError;

    use super::*;

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl IEmbeddingProvider for CountingProvider {
        async fn embed(&self, text: &str) -> MasteryResult<Embedding> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(OracleError::EmbeddingFailed {
                    reason: "down".to_string(),
                }
                .into());
            }
            Ok(Embedding::normalized(vec![text.len() as f32, 1.0]))
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn repeat_text_hits_the_cache() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let engine = EmbeddingEngine::new(provider.clone(), 16);

        let first = engine.embed("why is the sky blue").await.unwrap();
        let second = engine.embed("why is the sky blue").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_text_misses_the_cache() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let engine = EmbeddingEngine::new(provider.clone(), 16);

        engine.embed("a").await.unwrap();
        engine.embed("b").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let engine = EmbeddingEngine::new(provider.clone(), 16);

        assert!(engine.embed("x").await.is_err());
        assert!(engine.embed("x").await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
