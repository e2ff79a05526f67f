//! Lookup and upsert for subject clusters.

use rusqlite::{params, Connection, OptionalExtension};

use mastery_core::cluster::{Subject, SubjectCluster};
use mastery_core::errors::MasteryResult;

use crate::to_storage_err;

use super::{parse_level, parse_subject, parse_ts};

/// Fetch the subject aggregate for one (user, subject), if present.
pub fn get_subject_cluster(
    conn: &Connection,
    user_id: i64,
    subject: Subject,
) -> MasteryResult<Option<SubjectCluster>> {
    conn.query_row(
        "SELECT id, user_id, subject, learning_skill, mean_score,
                learning_delta, delta_since, last_updated
         FROM subject_clusters
         WHERE user_id = ?1 AND subject = ?2",
        params![user_id, subject.as_str()],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
            ))
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .map(
        |(id, user_id, subject, skill, mean, delta, delta_since, last_updated)| {
            Ok(SubjectCluster {
                id: Some(id),
                user_id,
                subject: parse_subject(&subject)?,
                learning_skill: parse_level(&skill)?,
                mean_score: mean,
                learning_delta: delta,
                delta_since: parse_ts(&delta_since)?,
                last_updated: parse_ts(&last_updated)?,
            })
        },
    )
    .transpose()
}

/// Insert a new subject cluster, returning its row id.
pub fn insert_subject_cluster(conn: &Connection, sc: &SubjectCluster) -> MasteryResult<i64> {
    conn.execute(
        "INSERT INTO subject_clusters (
            user_id, subject, learning_skill, mean_score,
            learning_delta, delta_since, last_updated
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            sc.user_id,
            sc.subject.as_str(),
            sc.learning_skill.as_str(),
            sc.mean_score,
            sc.learning_delta,
            sc.delta_since.to_rfc3339(),
            sc.last_updated.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Update an existing subject cluster in place. The id must be set.
pub fn update_subject_cluster(conn: &Connection, sc: &SubjectCluster) -> MasteryResult<()> {
    let id = sc
        .id
        .ok_or_else(|| to_storage_err("update_subject_cluster on unpersisted row".to_string()))?;
    let changed = conn
        .execute(
            "UPDATE subject_clusters SET
                learning_skill = ?1, mean_score = ?2, learning_delta = ?3,
                delta_since = ?4, last_updated = ?5
             WHERE id = ?6",
            params![
                sc.learning_skill.as_str(),
                sc.mean_score,
                sc.learning_delta,
                sc.delta_since.to_rfc3339(),
                sc.last_updated.to_rfc3339(),
                id,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(to_storage_err(format!("subject cluster {id} not found")));
    }
    Ok(())
}

/// Insert-or-update dispatch on whether the row has been persisted.
pub fn upsert_subject_cluster(conn: &Connection, sc: &SubjectCluster) -> MasteryResult<i64> {
    match sc.id {
        Some(id) => {
            update_subject_cluster(conn, sc)?;
            Ok(id)
        }
        None => insert_subject_cluster(conn, sc),
    }
}
