use chrono::{DateTime, Utc};

use crate::cluster::{ConceptCluster, InteractionSignal, Subject, SubjectCluster};
use crate::errors::MasteryResult;
use crate::models::{InteractionOutcome, ProgressReport};

/// Transactional persistence for clusters and signals, keyed by user id with
/// (user_id, subject) indexed lookup.
pub trait IClusterStorage: Send + Sync {
    /// All concept clusters for one (user, subject) pair, in stored order.
    /// Stored embedding blobs are dimension-validated; a mismatch is an error,
    /// not a silently skipped row.
    fn clusters_for_subject(
        &self,
        user_id: i64,
        subject: Subject,
    ) -> MasteryResult<Vec<ConceptCluster>>;

    /// The subject aggregate for one (user, subject) pair, if it exists yet.
    fn subject_cluster(
        &self,
        user_id: i64,
        subject: Subject,
    ) -> MasteryResult<Option<SubjectCluster>>;

    /// Persist one pipeline invocation's write set atomically: the
    /// new/updated concept cluster, the subject cluster upsert, and any
    /// signal rows all commit together or not at all.
    fn commit_interaction(&self, outcome: &InteractionOutcome) -> MasteryResult<()>;

    /// All signals for a user, oldest first. Append-only log.
    fn signals_for_user(&self, user_id: i64) -> MasteryResult<Vec<InteractionSignal>>;

    /// Per-user progress view: subjects with their concepts nested, including
    /// deltas since the last progress review.
    fn progress_report(&self, user_id: i64) -> MasteryResult<ProgressReport>;

    /// Zero all of a user's deltas and re-anchor `delta_since` to `now`.
    fn mark_progress_seen(&self, user_id: i64, now: DateTime<Utc>) -> MasteryResult<()>;
}
