//! Append and read for the interaction signal log. Rows are never updated.

use rusqlite::{params, Connection};

use mastery_core::cluster::{InteractionSignal, SignalKind};
use mastery_core::errors::MasteryResult;

use crate::to_storage_err;

use super::parse_ts;

/// Append one signal, returning its row id.
pub fn insert_signal(conn: &Connection, signal: &InteractionSignal) -> MasteryResult<i64> {
    conn.execute(
        "INSERT INTO interaction_signals (user_id, kind, message_ref, detected_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            signal.user_id,
            signal.kind.as_str(),
            signal.message_ref,
            signal.detected_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// All of a user's signals, oldest first.
pub fn signals_for_user(conn: &Connection, user_id: i64) -> MasteryResult<Vec<InteractionSignal>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, kind, message_ref, detected_at
             FROM interaction_signals
             WHERE user_id = ?1
             ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut signals = Vec::new();
    for row in rows {
        let (id, user_id, kind, message_ref, detected_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        signals.push(InteractionSignal {
            id: Some(id),
            user_id,
            kind: SignalKind::from_name(&kind)
                .ok_or_else(|| to_storage_err(format!("unknown signal kind {kind:?}")))?,
            message_ref,
            detected_at: parse_ts(&detected_at)?,
        });
    }
    Ok(signals)
}
