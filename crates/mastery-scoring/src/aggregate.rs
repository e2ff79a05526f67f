//! Subject-level mastery: the arithmetic mean of a subject's concept
//! cluster scores, bucketed into a label.

use chrono::{DateTime, Utc};

use mastery_core::cluster::{ConceptCluster, MasteryLevel, Subject, SubjectCluster};

/// Recompute the subject aggregate from the full cluster set for one
/// (user, subject) pair.
///
/// The caller is responsible for `clusters` containing every live cluster
/// exactly once, including any cluster created or updated this call.
/// Creates the SubjectCluster lazily on first use, updates in place
/// otherwise, and accumulates `learning_delta` from the stored mean.
/// Idempotent: an unchanged cluster set yields the same label and a zero
/// additional delta. An empty set is a no-op: the existing state (or
/// `None`) comes back unchanged, and nothing divides by zero.
pub fn recompute(
    user_id: i64,
    subject: Subject,
    existing: Option<SubjectCluster>,
    clusters: &[ConceptCluster],
    now: DateTime<Utc>,
) -> Option<SubjectCluster> {
    if clusters.is_empty() {
        return existing;
    }

    let mean = clusters
        .iter()
        .map(|c| c.confidence_score.value())
        .sum::<f64>()
        / clusters.len() as f64;

    match existing {
        Some(mut sc) => {
            sc.learning_delta += mean - sc.mean_score;
            sc.mean_score = mean;
            sc.learning_skill = MasteryLevel::from_score(mean);
            sc.last_updated = now;
            Some(sc)
        }
        None => Some(SubjectCluster::new(user_id, subject, mean, now)),
    }
}
