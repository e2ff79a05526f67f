//! Insert, update, and lookup for concept clusters.

use rusqlite::{params, Connection, Row};

use mastery_core::cluster::{ConceptCluster, Embedding, Score, Subject};
use mastery_core::errors::{MasteryResult, StorageError};

use crate::to_storage_err;

use super::{parse_level, parse_subject, parse_ts};

/// Insert a new cluster, returning its row id.
pub fn insert_cluster(conn: &Connection, cluster: &ConceptCluster) -> MasteryResult<i64> {
    conn.execute(
        "INSERT INTO concept_clusters (
            user_id, subject, embedding, dimensions, name,
            confidence_score, confidence, confidence_delta, delta_since, last_seen
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            cluster.user_id,
            cluster.subject.as_str(),
            cluster.embedding.to_bytes(),
            cluster.embedding.len() as i64,
            cluster.name,
            cluster.confidence_score.value(),
            cluster.confidence.as_str(),
            cluster.confidence_delta,
            cluster.delta_since.to_rfc3339(),
            cluster.last_seen.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Update an existing cluster in place. The id must be set.
pub fn update_cluster(conn: &Connection, cluster: &ConceptCluster) -> MasteryResult<()> {
    let id = cluster
        .id
        .ok_or_else(|| to_storage_err("update_cluster on unpersisted cluster".to_string()))?;
    let changed = conn
        .execute(
            "UPDATE concept_clusters SET
                embedding = ?1, dimensions = ?2, name = ?3,
                confidence_score = ?4, confidence = ?5, confidence_delta = ?6,
                delta_since = ?7, last_seen = ?8
             WHERE id = ?9",
            params![
                cluster.embedding.to_bytes(),
                cluster.embedding.len() as i64,
                cluster.name,
                cluster.confidence_score.value(),
                cluster.confidence.as_str(),
                cluster.confidence_delta,
                cluster.delta_since.to_rfc3339(),
                cluster.last_seen.to_rfc3339(),
                id,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(to_storage_err(format!("concept cluster {id} not found")));
    }
    Ok(())
}

/// Insert-or-update dispatch on whether the cluster has been persisted.
pub fn upsert_cluster(conn: &Connection, cluster: &ConceptCluster) -> MasteryResult<i64> {
    match cluster.id {
        Some(id) => {
            update_cluster(conn, cluster)?;
            Ok(id)
        }
        None => insert_cluster(conn, cluster),
    }
}

/// All clusters for one (user, subject), in stored (insertion) order,
/// the order the matcher's tie-break is defined against.
///
/// Every embedding blob is validated against `expected_dims`; a mismatch
/// fails the whole read rather than silently skipping the row.
pub fn clusters_for_subject(
    conn: &Connection,
    user_id: i64,
    subject: Subject,
    expected_dims: usize,
) -> MasteryResult<Vec<ConceptCluster>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, subject, embedding, dimensions, name,
                    confidence_score, confidence, confidence_delta, delta_since, last_seen
             FROM concept_clusters
             WHERE user_id = ?1 AND subject = ?2
             ORDER BY id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id, subject.as_str()], row_to_parts)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut clusters = Vec::new();
    for row in rows {
        let parts = row.map_err(|e| to_storage_err(e.to_string()))?;
        clusters.push(parts_to_cluster(parts, expected_dims)?);
    }
    Ok(clusters)
}

/// Raw column values before domain validation.
type ClusterParts = (
    i64,
    i64,
    String,
    Vec<u8>,
    i64,
    Option<String>,
    f64,
    String,
    f64,
    String,
    String,
);

fn row_to_parts(row: &Row<'_>) -> rusqlite::Result<ClusterParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
    ))
}

fn parts_to_cluster(parts: ClusterParts, expected_dims: usize) -> MasteryResult<ConceptCluster> {
    let (
        id,
        user_id,
        subject,
        embedding_blob,
        dimensions,
        name,
        confidence_score,
        confidence,
        confidence_delta,
        delta_since,
        last_seen,
    ) = parts;

    if dimensions as usize != expected_dims {
        return Err(StorageError::DimensionMismatch {
            expected: expected_dims,
            actual: dimensions as usize,
        }
        .into());
    }

    Ok(ConceptCluster {
        id: Some(id),
        user_id,
        subject: parse_subject(&subject)?,
        embedding: Embedding::from_bytes(&embedding_blob, expected_dims)?,
        name,
        confidence_score: Score::new(confidence_score),
        confidence: parse_level(&confidence)?,
        confidence_delta,
        delta_since: parse_ts(&delta_since)?,
        last_seen: parse_ts(&last_seen)?,
    })
}
