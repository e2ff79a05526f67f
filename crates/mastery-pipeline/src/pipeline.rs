use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use mastery_core::cluster::{ConceptCluster, InteractionSignal, SignalKind};
use mastery_core::config::{MatchingConfig, ScoringConfig};
use mastery_core::errors::MasteryResult;
use mastery_core::models::{Classification, InteractionOutcome, MasterySnapshot};
use mastery_core::traits::{
    IClusterStorage, IConceptClassifier, IEmbeddingProvider, ISignalExtractor,
};
use mastery_match::find_best_match;
use mastery_scoring::{aggregate, ConfidenceEngine, Reinforcement};

use crate::locks::UserSubjectLocks;

/// Fallback concept name when the classifier offers none.
const DEFAULT_CONCEPT_NAME: &str = "Concept";

/// The learning pipeline. One instance serves the whole process; every
/// collaborator arrives by explicit injection, so tests run it against
/// fakes and an in-memory store.
pub struct LearningPipeline {
    embedder: Arc<dyn IEmbeddingProvider>,
    classifier: Arc<dyn IConceptClassifier>,
    storage: Arc<dyn IClusterStorage>,
    extractor: Option<Arc<dyn ISignalExtractor>>,
    scoring: ConfidenceEngine,
    matching: MatchingConfig,
    locks: UserSubjectLocks,
}

impl std::fmt::Debug for LearningPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearningPipeline")
            .field("matching", &self.matching)
            .finish_non_exhaustive()
    }
}

impl LearningPipeline {
    /// Create a pipeline with default matching/scoring config and no
    /// signal extraction.
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        classifier: Arc<dyn IConceptClassifier>,
        storage: Arc<dyn IClusterStorage>,
    ) -> Self {
        Self {
            embedder,
            classifier,
            storage,
            extractor: None,
            scoring: ConfidenceEngine::default(),
            matching: MatchingConfig::default(),
            locks: UserSubjectLocks::new(),
        }
    }

    /// Enable the optional signal extraction stage.
    pub fn with_extractor(mut self, extractor: Arc<dyn ISignalExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_matching(mut self, config: MatchingConfig) -> Self {
        self.matching = config;
        self
    }

    pub fn with_scoring(mut self, config: ScoringConfig) -> Self {
        self.scoring = ConfidenceEngine::new(config);
        self
    }

    /// Process one user-authored message through the full pipeline.
    ///
    /// Returns `Ok(None)` for a whitespace-only message (silent no-op).
    /// An embedding failure aborts with nothing persisted; a classifier
    /// transport failure degrades to `General` and the update proceeds.
    /// All persistence happens in one atomic commit at the end, so a
    /// failure at any stage leaves no partial state behind.
    pub async fn process_message(
        &self,
        user_id: i64,
        message: &str,
        message_ref: Option<&str>,
    ) -> MasteryResult<Option<MasterySnapshot>> {
        if message.trim().is_empty() {
            return Ok(None);
        }
        let now = Utc::now();

        // Suspension point: embed. Without a vector no cluster match is
        // possible, so failure aborts this message's learning update.
        let embedding = self.embedder.embed(message).await.map_err(|e| {
            warn!(user_id, stage = "embed", error = %e, "learning update aborted");
            e
        })?;

        // Suspension point: classify. Transport failure degrades to General.
        let classification = match self.classifier.classify(message).await {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    user_id,
                    stage = "classify",
                    error = %e,
                    "classifier unavailable, falling back to General"
                );
                Classification::general()
            }
        };
        let subject = classification.subject;

        // Pure text scan, independent of the oracle path.
        let signal_kinds: Vec<SignalKind> = self
            .extractor
            .as_ref()
            .map(|x| x.extract(message))
            .unwrap_or_default();

        // Steps 4-9 run under the per-(user, subject) lock: load, match,
        // score, aggregate, commit. This is what makes concurrent same-pair
        // messages safe.
        let _guard = self.locks.acquire(user_id, subject).await;

        let mut clusters = self.storage.clusters_for_subject(user_id, subject)?;
        let best = find_best_match(&embedding, &clusters);
        let best_similarity = best.map_or(0.0, |m| m.similarity);

        let matched = best.filter(|m| m.similarity > self.matching.similarity_threshold);
        let cluster: ConceptCluster = match matched {
            Some(m) => {
                let existing = &mut clusters[m.index];
                let reinforcement = if signal_kinds.is_empty() {
                    Reinforcement::Revisit {
                        similarity: m.similarity,
                    }
                } else {
                    Reinforcement::Signals(&signal_kinds)
                };
                self.scoring.reinforce(existing, reinforcement, now);
                debug!(
                    user_id,
                    subject = %subject,
                    similarity = m.similarity,
                    score = existing.confidence_score.value(),
                    "reinforced existing cluster"
                );
                existing.clone()
            }
            None => {
                let created = self.scoring.new_cluster(
                    user_id,
                    subject,
                    embedding,
                    classification
                        .concept_name
                        .clone()
                        .or_else(|| Some(DEFAULT_CONCEPT_NAME.to_string())),
                    best_similarity,
                    now,
                );
                clusters.push(created.clone());
                debug!(
                    user_id,
                    subject = %subject,
                    best_similarity,
                    score = created.confidence_score.value(),
                    "created new cluster"
                );
                created
            }
        };

        let existing_subject = self.storage.subject_cluster(user_id, subject)?;
        // `clusters` holds the updated/new cluster, so it is never empty here.
        let Some(subject_cluster) =
            aggregate::recompute(user_id, subject, existing_subject, &clusters, now)
        else {
            return Ok(None);
        };

        let signals: Vec<InteractionSignal> = signal_kinds
            .iter()
            .map(|kind| {
                InteractionSignal::new(user_id, *kind, message_ref.map(str::to_string), now)
            })
            .collect();

        let outcome = InteractionOutcome {
            user_id,
            subject,
            cluster: cluster.clone(),
            subject_cluster: subject_cluster.clone(),
            signals,
        };
        self.storage.commit_interaction(&outcome).map_err(|e| {
            warn!(user_id, subject = %subject, stage = "commit", error = %e, "learning update aborted");
            e
        })?;

        info!(
            user_id,
            subject = %subject,
            concept = cluster.name.as_deref().unwrap_or("-"),
            skill = %subject_cluster.learning_skill,
            "learning update committed"
        );

        Ok(Some(MasterySnapshot {
            subject,
            learning_skill: subject_cluster.learning_skill,
            concept_name: cluster.name.clone(),
            concept_confidence: cluster.confidence,
            concept_score: cluster.confidence_score,
        }))
    }

    /// Fire-and-forget entry point for the chat flow: any failure is
    /// logged and swallowed, so a degraded learning tracker never breaks
    /// the chat response.
    pub async fn observe_message(
        &self,
        user_id: i64,
        message: &str,
        message_ref: Option<&str>,
    ) -> Option<MasterySnapshot> {
        match self.process_message(user_id, message, message_ref).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(user_id, error = %e, "learning update skipped");
                None
            }
        }
    }
}
