use async_trait::async_trait;

use crate::cluster::Embedding;
use crate::errors::MasteryResult;

/// Embedding generation collaborator.
///
/// Implementations are stateless per call and safe to share across
/// concurrent pipeline invocations. A failed call is reported as an error,
/// never as a zero vector.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a unit-normalized vector.
    async fn embed(&self, text: &str) -> MasteryResult<Embedding>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
