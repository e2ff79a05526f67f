//! The per-user progress view and the delta reset that backs it.
//!
//! Reads column subsets directly (no embedding decode) since the progress
//! screen never needs vectors.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use mastery_core::cluster::Subject;
use mastery_core::errors::MasteryResult;
use mastery_core::models::{ConceptProgress, ProgressReport, SubjectProgress};

use crate::to_storage_err;

use super::{parse_level, parse_subject, parse_ts};

/// Build the full progress report: subjects with their concepts nested,
/// including deltas accumulated since the user last reviewed progress.
pub fn progress_report(conn: &Connection, user_id: i64) -> MasteryResult<ProgressReport> {
    let mut concepts_by_subject: HashMap<Subject, Vec<ConceptProgress>> = HashMap::new();

    let mut stmt = conn
        .prepare(
            "SELECT subject, name, confidence, confidence_score,
                    confidence_delta, last_seen, delta_since
             FROM concept_clusters
             WHERE user_id = ?1
             ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    for row in rows {
        let (subject, name, confidence, score, delta, last_seen, delta_since) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        concepts_by_subject
            .entry(parse_subject(&subject)?)
            .or_default()
            .push(ConceptProgress {
                name,
                confidence: parse_level(&confidence)?,
                confidence_score: score,
                confidence_delta: delta,
                last_seen: parse_ts(&last_seen)?,
                delta_since: parse_ts(&delta_since)?,
            });
    }

    let mut stmt = conn
        .prepare(
            "SELECT subject, learning_skill, learning_delta, last_updated, delta_since
             FROM subject_clusters
             WHERE user_id = ?1
             ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut subjects = Vec::new();
    for row in rows {
        let (subject, skill, delta, last_updated, delta_since) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let subject = parse_subject(&subject)?;
        subjects.push(SubjectProgress {
            subject,
            learning_skill: parse_level(&skill)?,
            learning_delta: delta,
            last_updated: parse_ts(&last_updated)?,
            delta_since: parse_ts(&delta_since)?,
            concepts: concepts_by_subject.remove(&subject).unwrap_or_default(),
        });
    }

    Ok(ProgressReport { subjects })
}

/// Zero every delta for a user and re-anchor `delta_since` to `now`.
/// Runs both updates in one transaction.
pub fn mark_progress_seen(
    conn: &Connection,
    user_id: i64,
    now: DateTime<Utc>,
) -> MasteryResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("mark_progress_seen begin: {e}")))?;

    let anchor = now.to_rfc3339();
    tx.execute(
        "UPDATE concept_clusters SET confidence_delta = 0.0, delta_since = ?1 WHERE user_id = ?2",
        params![anchor, user_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    tx.execute(
        "UPDATE subject_clusters SET learning_delta = 0.0, delta_since = ?1 WHERE user_id = ?2",
        params![anchor, user_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("mark_progress_seen commit: {e}")))?;
    Ok(())
}
