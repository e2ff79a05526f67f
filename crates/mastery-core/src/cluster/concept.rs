use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CONCEPT_NAME_CHARS;

use super::embedding::Embedding;
use super::level::MasteryLevel;
use super::score::Score;
use super::subject::Subject;

/// One per (user, subject, distinct semantic concept).
///
/// Anchored by the most recent representative embedding and a confidence
/// score that decays with neglect and grows with reinforcement. The
/// `confidence` label is always the deterministic bucketing of
/// `confidence_score`; mutate the score through [`ConceptCluster::set_score`]
/// so the two stay in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptCluster {
    /// Row id. `None` until persisted.
    pub id: Option<i64>,
    /// Owning user.
    pub user_id: i64,
    pub subject: Subject,
    /// Semantic fingerprint; unit-normalized at write time.
    pub embedding: Embedding,
    /// Short human-readable label from the classifier. Not unique.
    pub name: Option<String>,
    pub confidence_score: Score,
    /// Derived label; kept in lockstep with `confidence_score`.
    pub confidence: MasteryLevel,
    /// Net score change accumulated since `delta_since`.
    pub confidence_delta: f64,
    /// Anchor for delta accumulation; reset when the user reviews progress.
    pub delta_since: DateTime<Utc>,
    /// Timestamp of the most recent reinforcing interaction.
    pub last_seen: DateTime<Utc>,
}

impl ConceptCluster {
    /// Build a fresh, unpersisted cluster. The name is truncated to
    /// [`MAX_CONCEPT_NAME_CHARS`] on a char boundary.
    pub fn new(
        user_id: i64,
        subject: Subject,
        embedding: Embedding,
        name: Option<String>,
        score: Score,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            subject,
            embedding,
            name: name.map(|n| truncate_name(&n)),
            confidence_score: score,
            confidence: score.label(),
            confidence_delta: 0.0,
            delta_since: now,
            last_seen: now,
        }
    }

    /// Replace the score, recompute the label, and accumulate the delta.
    pub fn set_score(&mut self, score: Score) {
        self.confidence_delta += score.value() - self.confidence_score.value();
        self.confidence_score = score;
        self.confidence = score.label();
    }
}

/// Truncate a concept name to the storage limit without splitting a char.
fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_CONCEPT_NAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> ConceptCluster {
        ConceptCluster::new(
            1,
            Subject::Math,
            Embedding::new(vec![1.0, 0.0]),
            Some("Sign rules".to_string()),
            Score::new(0.5),
            Utc::now(),
        )
    }

    #[test]
    fn set_score_keeps_label_in_lockstep() {
        let mut c = cluster();
        c.set_score(Score::new(3.4));
        assert_eq!(c.confidence, MasteryLevel::Improving);
        assert_eq!(c.confidence, c.confidence_score.label());
    }

    #[test]
    fn set_score_accumulates_delta() {
        let mut c = cluster();
        c.set_score(Score::new(2.0));
        c.set_score(Score::new(1.5));
        assert!((c.confidence_delta - 1.0).abs() < 1e-9);
    }

    #[test]
    fn long_names_truncate_on_char_boundary() {
        let long = "é".repeat(40);
        let c = ConceptCluster::new(
            1,
            Subject::English,
            Embedding::new(vec![0.0]),
            Some(long),
            Score::default(),
            Utc::now(),
        );
        assert_eq!(c.name.unwrap().chars().count(), MAX_CONCEPT_NAME_CHARS);
    }
}
