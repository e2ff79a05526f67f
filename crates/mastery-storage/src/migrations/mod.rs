//! Schema migrations, keyed by SQLite's `user_version` pragma. Each module
//! is one version; versions run in order and are recorded as they apply.

mod v001_clusters;
mod v002_signals;

use rusqlite::Connection;

use mastery_core::errors::{MasteryError, MasteryResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> MasteryResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_clusters::migrate),
    (2, v002_signals::migrate),
];

/// Apply every migration newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> MasteryResult<()> {
    let current: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if i64::from(*version) <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            MasteryError::from(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied schema migration");
    }
    Ok(())
}
