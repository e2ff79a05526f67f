//! v001: concept_clusters, subject_clusters.

use rusqlite::Connection;

use mastery_core::errors::MasteryResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MasteryResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS concept_clusters (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL,
            subject           TEXT NOT NULL,
            embedding         BLOB NOT NULL,
            dimensions        INTEGER NOT NULL,
            name              TEXT,
            confidence_score  REAL NOT NULL DEFAULT 0.0,
            confidence        TEXT NOT NULL DEFAULT 'Weak',
            confidence_delta  REAL NOT NULL DEFAULT 0.0,
            delta_since       TEXT NOT NULL,
            last_seen         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_concept_user_subject
            ON concept_clusters(user_id, subject);

        CREATE TABLE IF NOT EXISTS subject_clusters (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL,
            subject         TEXT NOT NULL,
            learning_skill  TEXT NOT NULL DEFAULT 'Weak',
            mean_score      REAL NOT NULL DEFAULT 0.0,
            learning_delta  REAL NOT NULL DEFAULT 0.0,
            delta_since     TEXT NOT NULL,
            last_updated    TEXT NOT NULL,
            UNIQUE (user_id, subject)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
