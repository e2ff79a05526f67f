//! Per-subsystem configuration, serde-defaulted so a partial TOML file (or
//! none at all) yields a working setup. API keys are read from the
//! environment, never from config files.

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{MasteryError, MasteryResult};

/// Similarity matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Cosine similarity above which (strictly) a message reinforces an
    /// existing cluster instead of creating a new one.
    pub similarity_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// Confidence update rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points lost per whole day since the cluster was last seen.
    pub decay_per_day: f64,
    /// Flat bonus for coming back to a concept at all.
    pub revisit_bonus: f64,
    /// Weight on the match similarity ("this really is the same concept").
    pub similarity_weight: f64,
    /// Flat bonus when the revisit gap lands in the spaced-repetition window.
    pub spacing_bonus: f64,
    /// Inclusive lower bound of the spacing window, in whole days.
    pub spacing_min_days: i64,
    /// Inclusive upper bound of the spacing window, in whole days.
    pub spacing_max_days: i64,
    /// Base score for a brand-new cluster.
    pub initial_base: f64,
    /// Weight on the best (sub-threshold) similarity when initializing, so
    /// near-misses start warmer than cold concepts.
    pub initial_similarity_weight: f64,
    /// Cap on the summed signal weights for a single event.
    pub max_signal_gain: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            decay_per_day: defaults::DEFAULT_DECAY_PER_DAY,
            revisit_bonus: defaults::DEFAULT_REVISIT_BONUS,
            similarity_weight: defaults::DEFAULT_SIMILARITY_WEIGHT,
            spacing_bonus: defaults::DEFAULT_SPACING_BONUS,
            spacing_min_days: defaults::DEFAULT_SPACING_MIN_DAYS,
            spacing_max_days: defaults::DEFAULT_SPACING_MAX_DAYS,
            initial_base: defaults::DEFAULT_INITIAL_BASE,
            initial_similarity_weight: defaults::DEFAULT_INITIAL_SIMILARITY_WEIGHT,
            max_signal_gain: defaults::DEFAULT_MAX_SIGNAL_GAIN,
        }
    }
}

/// Embedder collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub model: String,
    /// Fixed embedding dimensionality; validated on every provider response
    /// and on every storage read.
    pub dimensions: usize,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// L1 cache capacity (entries), keyed by content hash.
    pub cache_capacity: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

/// Subject/concept classifier collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Messages are truncated to this many chars before classification.
    pub max_message_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_CLASSIFIER_ENDPOINT.to_string(),
            model: defaults::DEFAULT_CLASSIFIER_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            max_message_chars: defaults::DEFAULT_CLASSIFIER_MAX_CHARS,
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::DEFAULT_DB_PATH),
        }
    }
}

/// Root configuration aggregating every subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryConfig {
    pub matching: MatchingConfig,
    pub scoring: ScoringConfig,
    pub embedding: EmbeddingConfig,
    pub classifier: ClassifierConfig,
    pub storage: StorageConfig,
}

impl MasteryConfig {
    /// Parse from a TOML string. Missing sections and fields take defaults.
    pub fn from_toml_str(raw: &str) -> MasteryResult<Self> {
        toml::from_str(raw).map_err(|e| MasteryError::Config(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> MasteryResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MasteryError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = MasteryConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.matching.similarity_threshold, 0.85);
        assert_eq!(cfg.scoring.decay_per_day, 0.1);
        assert_eq!(cfg.embedding.dimensions, 1536);
    }

    #[test]
    fn partial_section_overrides_only_named_fields() {
        let cfg = MasteryConfig::from_toml_str(
            "[scoring]\ndecay_per_day = 0.2\n\n[embedding]\ndimensions = 8\n",
        )
        .unwrap();
        assert_eq!(cfg.scoring.decay_per_day, 0.2);
        assert_eq!(cfg.scoring.revisit_bonus, 0.5);
        assert_eq!(cfg.embedding.dimensions, 8);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(MasteryConfig::from_toml_str("[scoring\n").is_err());
    }
}
