/// Mastery engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cosine similarity above which a message reinforces an existing cluster
/// instead of creating a new one. Strictly greater-than.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Confidence points lost per whole day since a cluster was last seen.
pub const DECAY_PER_DAY: f64 = 0.1;

/// Hard ceiling for any confidence score.
pub const MAX_CONFIDENCE: f64 = 6.0;

/// Maximum length of a concept cluster's human-readable name.
pub const MAX_CONCEPT_NAME_CHARS: usize = 32;
