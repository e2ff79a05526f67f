//! Default values shared by the config structs.

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

pub const DEFAULT_DECAY_PER_DAY: f64 = 0.1;
pub const DEFAULT_REVISIT_BONUS: f64 = 0.5;
pub const DEFAULT_SIMILARITY_WEIGHT: f64 = 0.8;
pub const DEFAULT_SPACING_BONUS: f64 = 1.0;
pub const DEFAULT_SPACING_MIN_DAYS: i64 = 2;
pub const DEFAULT_SPACING_MAX_DAYS: i64 = 14;
pub const DEFAULT_INITIAL_BASE: f64 = 0.5;
pub const DEFAULT_INITIAL_SIMILARITY_WEIGHT: f64 = 0.5;
pub const DEFAULT_MAX_SIGNAL_GAIN: f64 = 2.5;

pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 4096;

pub const DEFAULT_CLASSIFIER_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CLASSIFIER_MAX_CHARS: usize = 500;

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

pub const DEFAULT_DB_PATH: &str = "mastery.db";
