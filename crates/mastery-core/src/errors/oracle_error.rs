/// Errors from the external embedding/classification collaborators.
///
/// An embedding failure aborts the message's learning update entirely (no
/// meaningful cluster match is possible without a vector). A classification
/// failure is degraded to `Subject::General` at the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("embedding request failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("classification request failed: {reason}")]
    ClassificationFailed { reason: String },

    #[error("malformed oracle response: {reason}")]
    MalformedResponse { reason: String },

    #[error("embedding dimension mismatch from provider: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("API key not set: {var}")]
    MissingApiKey { var: String },
}
