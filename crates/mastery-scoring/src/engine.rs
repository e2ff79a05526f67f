use chrono::{DateTime, Utc};

use mastery_core::cluster::{ConceptCluster, Embedding, Score, SignalKind, Subject};
use mastery_core::config::ScoringConfig;

use crate::{decay, reinforcement};

/// What reinforces a cluster on this interaction.
///
/// `Signals` replaces the revisit rule when signal extraction is enabled and
/// at least one signal fired; the pipeline falls back to `Revisit` when the
/// extractor stays silent, so ordinary revisits still reinforce.
#[derive(Debug, Clone, Copy)]
pub enum Reinforcement<'a> {
    /// Revisit bonus plus similarity-weighted boost.
    Revisit { similarity: f64 },
    /// Capped sum of detected signal weights.
    Signals(&'a [SignalKind]),
}

/// Confidence engine implementing the decay → reinforcement → spacing → cap
/// update rule and the new-cluster initialization rule.
pub struct ConfidenceEngine {
    config: ScoringConfig,
}

impl ConfidenceEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Update a cluster in place for one reinforcing interaction.
    ///
    /// Order matters: decay by elapsed whole days first (floored at 0), then
    /// add the reinforcement gain, then the spacing bonus when the gap since
    /// last review lands in the [spacing_min_days, spacing_max_days] window.
    /// The final score is clamped to the confidence ceiling, the label is
    /// recomputed, and `last_seen` advances to `now` on every branch.
    pub fn reinforce(
        &self,
        cluster: &mut ConceptCluster,
        reinforcement: Reinforcement<'_>,
        now: DateTime<Utc>,
    ) {
        let days = decay::elapsed_days(cluster.last_seen, now);
        let decayed = decay::apply(cluster.confidence_score, days, self.config.decay_per_day);

        let gain = match reinforcement {
            Reinforcement::Revisit { similarity } => {
                reinforcement::revisit_gain(similarity, &self.config)
            }
            Reinforcement::Signals(kinds) => reinforcement::signal_gain(kinds, &self.config),
        };

        let spacing =
            if (self.config.spacing_min_days..=self.config.spacing_max_days).contains(&days) {
                self.config.spacing_bonus
            } else {
                0.0
            };

        cluster.set_score(Score::new(decayed + gain + spacing));
        cluster.last_seen = now;
    }

    /// Initial score for a brand-new cluster: the flat base plus a fraction
    /// of the best similarity seen during matching, even when sub-threshold, so
    /// near-misses start warmer than cold concepts. With no candidates at all
    /// the similarity is 0.0 and the score is exactly the base.
    pub fn initial_score(&self, best_similarity: f64) -> Score {
        Score::new(
            self.config.initial_base
                + best_similarity.max(0.0) * self.config.initial_similarity_weight,
        )
    }

    /// Build a fresh cluster with the initialization rule applied.
    pub fn new_cluster(
        &self,
        user_id: i64,
        subject: Subject,
        embedding: Embedding,
        name: Option<String>,
        best_similarity: f64,
        now: DateTime<Utc>,
    ) -> ConceptCluster {
        ConceptCluster::new(
            user_id,
            subject,
            embedding,
            name,
            self.initial_score(best_similarity),
            now,
        )
    }
}

impl Default for ConfidenceEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
