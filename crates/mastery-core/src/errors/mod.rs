//! Error taxonomy: per-layer enums aggregated into [`MasteryError`].

mod oracle_error;
mod storage_error;

pub use oracle_error::OracleError;
pub use storage_error::StorageError;

/// Top-level error for the Mastery engine.
#[derive(Debug, thiserror::Error)]
pub enum MasteryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("config error: {0}")]
    Config(String),
}

pub type MasteryResult<T> = Result<T, MasteryError>;
