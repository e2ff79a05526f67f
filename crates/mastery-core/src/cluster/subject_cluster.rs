use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::level::MasteryLevel;
use super::subject::Subject;

/// One per (user, subject): the mean-based aggregate of that subject's
/// concept clusters.
///
/// Always derivable from the live concept cluster set; `mean_score` is stored
/// so delta accumulation survives restarts, but the label must equal the
/// bucketing of the mean at last recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectCluster {
    /// Row id. `None` until persisted.
    pub id: Option<i64>,
    /// Owning user.
    pub user_id: i64,
    pub subject: Subject,
    /// Aggregate mastery label for the subject.
    pub learning_skill: MasteryLevel,
    /// Mean concept score backing the label at last recompute.
    pub mean_score: f64,
    /// Net mean-score change accumulated since `delta_since`.
    pub learning_delta: f64,
    /// Anchor for delta accumulation; reset when the user reviews progress.
    pub delta_since: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl SubjectCluster {
    /// Build a fresh, unpersisted subject cluster from a first mean.
    pub fn new(user_id: i64, subject: Subject, mean_score: f64, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id,
            subject,
            learning_skill: MasteryLevel::from_score(mean_score),
            mean_score,
            learning_delta: 0.0,
            delta_since: now,
            last_updated: now,
        }
    }
}
