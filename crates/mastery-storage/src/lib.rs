//! # mastery-storage
//!
//! SQLite persistence for the learning tracker: a single write connection
//! plus a read pool, `user_version`-keyed migrations, and an engine that
//! commits each pipeline invocation's write set in one transaction.

mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use mastery_core::errors::{MasteryError, StorageError};

/// Wrap a SQLite error message into the storage error type.
pub(crate) fn to_storage_err(message: String) -> MasteryError {
    StorageError::SqliteError { message }.into()
}
