//! v002: interaction_signals (append-only).

use rusqlite::Connection;

use mastery_core::errors::MasteryResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MasteryResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS interaction_signals (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            kind         TEXT NOT NULL,
            message_ref  TEXT,
            detected_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_signals_user ON interaction_signals(user_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
