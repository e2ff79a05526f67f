use std::sync::Arc;

use chrono::{Duration, Utc};
use mastery_core::cluster::{MasteryLevel, SignalKind, Subject, SubjectCluster};
use mastery_core::config::MatchingConfig;
use mastery_core::models::InteractionOutcome;
use mastery_core::traits::IClusterStorage;
use mastery_pipeline::LearningPipeline;
use mastery_signals::RegexSignalExtractor;
use mastery_storage::StorageEngine;
use test_fixtures::{make_cluster, FailingClassifier, FailingEmbedder, FakeClassifier, FakeEmbedder};

const DIMS: usize = 3;

fn seed_cluster(
    storage: &StorageEngine,
    user_id: i64,
    subject: Subject,
    values: Vec<f32>,
    score: f64,
    days_ago: i64,
) {
    let cluster = make_cluster(
        user_id,
        subject,
        values,
        score,
        Utc::now() - Duration::days(days_ago),
    );
    let sc = SubjectCluster::new(user_id, subject, score, Utc::now() - Duration::days(days_ago));
    storage
        .commit_interaction(&InteractionOutcome {
            user_id,
            subject,
            cluster,
            subject_cluster: sc,
            signals: vec![],
        })
        .unwrap();
}

// ── End-to-end scenarios ─────────────────────────────────────────────────

#[tokio::test]
async fn first_message_creates_cluster_and_subject_at_weak() {
    let msg = "Why does a negative times a negative equal a positive?";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![1.0, 0.0, 0.0]));
    let classifier =
        Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Sign rules")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());

    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    // No prior clusters: similarity 0.0, initial score exactly the 0.5 base.
    assert_eq!(snapshot.subject, Subject::Math);
    assert_eq!(snapshot.learning_skill, MasteryLevel::Weak);
    assert_eq!(snapshot.concept_name.as_deref(), Some("Sign rules"));
    assert!((snapshot.concept_score.value() - 0.5).abs() < 1e-9);

    let clusters = storage.clusters_for_subject(7, Subject::Math).unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].confidence, MasteryLevel::Weak);

    let sc = storage.subject_cluster(7, Subject::Math).unwrap().unwrap();
    assert_eq!(sc.learning_skill, MasteryLevel::Weak);
    assert!((sc.mean_score - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn near_duplicate_three_days_later_decays_then_reinforces() {
    let msg = "Can you remind me why two negatives multiply to a positive?";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![1.0, 0.0, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Sign rules")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    seed_cluster(&storage, 7, Subject::Math, vec![1.0, 0.0, 0.0], 2.0, 3);

    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());
    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    // Identical embedding: similarity 1.0 > 0.85, so the cluster is
    // reinforced, not duplicated. 2.0 decays by 0.1*3 to 1.7, then
    // +0.5 revisit +1.0*0.8 similarity +1.0 spacing (3 days in [2, 14]).
    let expected = 1.7 + 0.5 + 0.8 + 1.0;
    assert!((snapshot.concept_score.value() - expected).abs() < 1e-6);
    assert!(snapshot.concept_score.value() > 2.0, "reinforcement must beat decay here");
    assert_eq!(snapshot.learning_skill, MasteryLevel::Improving);

    let clusters = storage.clusters_for_subject(7, Subject::Math).unwrap();
    assert_eq!(clusters.len(), 1, "revisit must not create a second cluster");
}

#[tokio::test]
async fn dissimilar_message_creates_a_second_cluster() {
    let msg = "What is the area of a circle?";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![0.0, 1.0, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Circle area")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    seed_cluster(&storage, 7, Subject::Math, vec![1.0, 0.0, 0.0], 2.0, 0);

    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());
    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    let clusters = storage.clusters_for_subject(7, Subject::Math).unwrap();
    assert_eq!(clusters.len(), 2);
    // Orthogonal best match: initial score is the flat base.
    assert!((snapshot.concept_score.value() - 0.5).abs() < 1e-9);

    // Subject mean covers both clusters: (2.0 + 0.5) / 2.
    let sc = storage.subject_cluster(7, Subject::Math).unwrap().unwrap();
    assert!((sc.mean_score - 1.25).abs() < 1e-9);
    assert_eq!(sc.learning_skill, MasteryLevel::Weak);
}

#[tokio::test]
async fn sub_threshold_near_miss_starts_warmer() {
    let msg = "How do I factor a quadratic?";
    // Dot with the seeded [1, 0, 0] is exactly 0.8: below threshold,
    // but it warms the initial score to 0.5 + 0.8 * 0.5.
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![0.8, 0.6, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Factoring")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    seed_cluster(&storage, 7, Subject::Math, vec![1.0, 0.0, 0.0], 2.0, 0);

    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());
    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    assert_eq!(storage.clusters_for_subject(7, Subject::Math).unwrap().len(), 2);
    assert!((snapshot.concept_score.value() - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn threshold_is_strictly_greater_than() {
    let msg = "orthogonal concept";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![0.0, 1.0, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, None));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    seed_cluster(&storage, 7, Subject::Math, vec![1.0, 0.0, 0.0], 2.0, 0);

    // With the threshold lowered to exactly the similarity (0.0), equality
    // must still create a new cluster rather than reinforce.
    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone())
        .with_matching(MatchingConfig {
            similarity_threshold: 0.0,
        });
    pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    assert_eq!(storage.clusters_for_subject(7, Subject::Math).unwrap().len(), 2);
}

// ── Input and failure semantics ──────────────────────────────────────────

#[tokio::test]
async fn whitespace_only_message_is_a_silent_no_op() {
    let embedder = Arc::new(FakeEmbedder::new(DIMS));
    let classifier = Arc::new(FakeClassifier::new());
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());

    // The fake embedder errors on any text, so reaching it would fail the
    // test; the empty check must short-circuit first.
    assert!(pipeline.process_message(7, "   \n\t", None).await.unwrap().is_none());
    assert!(storage.clusters_for_subject(7, Subject::General).unwrap().is_empty());
}

#[tokio::test]
async fn embedder_failure_aborts_with_nothing_persisted() {
    let embedder = Arc::new(FailingEmbedder { dims: DIMS });
    let classifier = Arc::new(FakeClassifier::new().with("hi", Subject::Math, None));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());

    assert!(pipeline.process_message(7, "hi", None).await.is_err());
    for subject in Subject::ALL {
        assert!(storage.clusters_for_subject(7, subject).unwrap().is_empty());
        assert!(storage.subject_cluster(7, subject).unwrap().is_none());
    }

    // The fire-and-forget wrapper swallows the same failure.
    assert!(pipeline.observe_message(7, "hi", None).await.is_none());
}

#[tokio::test]
async fn classifier_transport_failure_degrades_to_general() {
    let msg = "completely unclassifiable";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![0.0, 0.0, 1.0]));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    let pipeline =
        LearningPipeline::new(embedder, Arc::new(FailingClassifier), storage.clone());

    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    assert_eq!(snapshot.subject, Subject::General);
    assert_eq!(snapshot.concept_name.as_deref(), Some("Concept"));
    assert_eq!(storage.clusters_for_subject(7, Subject::General).unwrap().len(), 1);
}

#[tokio::test]
async fn concept_names_truncate_to_the_storage_limit() {
    let msg = "tell me about the French Revolution's causes";
    let long_name = "A very long concept name that exceeds the column limit";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![0.0, 1.0, 1.0]));
    let classifier =
        Arc::new(FakeClassifier::new().with(msg, Subject::General, Some(long_name)));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone());

    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();
    assert_eq!(snapshot.concept_name.unwrap().chars().count(), 32);
}

// ── Signal extraction stage ──────────────────────────────────────────────

#[tokio::test]
async fn detected_signals_are_persisted_with_the_message_ref() {
    let msg = "Oh wait, I meant the denominator";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![1.0, 0.0, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Fractions")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone())
        .with_extractor(Arc::new(RegexSignalExtractor::new()));

    pipeline.process_message(7, msg, Some("msg-42")).await.unwrap().unwrap();

    let signals = storage.signals_for_user(7).unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].kind, SignalKind::SelfCorrection);
    assert_eq!(signals[0].message_ref.as_deref(), Some("msg-42"));
}

#[tokio::test]
async fn signal_reinforcement_replaces_the_revisit_rule_on_match() {
    let msg = "Oh wait, I mixed that up, the slope is rise over run";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![1.0, 0.0, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Slope")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    seed_cluster(&storage, 7, Subject::Math, vec![1.0, 0.0, 0.0], 1.0, 0);

    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone())
        .with_extractor(Arc::new(RegexSignalExtractor::new()));
    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    // Same-day revisit: no decay, no spacing. Self-correction weight 2.0
    // applies instead of the revisit rule's 0.5 + 1.0*0.8 = 1.3.
    assert!((snapshot.concept_score.value() - 3.0).abs() < 1e-6);
}

#[tokio::test]
async fn silent_extractor_falls_back_to_revisit_reinforcement() {
    let msg = "What is the slope of y equals two x";
    let embedder = Arc::new(FakeEmbedder::new(DIMS).with(msg, vec![1.0, 0.0, 0.0]));
    let classifier = Arc::new(FakeClassifier::new().with(msg, Subject::Math, Some("Slope")));
    let storage = Arc::new(StorageEngine::open_in_memory(DIMS).unwrap());
    seed_cluster(&storage, 7, Subject::Math, vec![1.0, 0.0, 0.0], 1.0, 0);

    let pipeline = LearningPipeline::new(embedder, classifier, storage.clone())
        .with_extractor(Arc::new(RegexSignalExtractor::new()));
    let snapshot = pipeline.process_message(7, msg, None).await.unwrap().unwrap();

    // No signal fired, so the ordinary revisit rule applies.
    assert!((snapshot.concept_score.value() - (1.0 + 0.5 + 0.8)).abs() < 1e-6);
    assert!(storage.signals_for_user(7).unwrap().is_empty());
}
