use chrono::{Duration, Utc};
use mastery_core::cluster::{
    ConceptCluster, Embedding, MasteryLevel, Score, SignalKind, Subject,
};
use mastery_core::config::ScoringConfig;
use mastery_scoring::{ConfidenceEngine, Reinforcement};

fn make_cluster(score: f64, days_since_seen: i64) -> ConceptCluster {
    let now = Utc::now();
    ConceptCluster::new(
        1,
        Subject::Math,
        Embedding::normalized(vec![1.0, 0.0, 0.0]),
        Some("Sign rules".to_string()),
        Score::new(score),
        now - Duration::days(days_since_seen),
    )
}

// ── Label boundaries ─────────────────────────────────────────────────────

#[test]
fn label_boundaries_are_exact() {
    assert_eq!(MasteryLevel::from_score(2.99), MasteryLevel::Weak);
    assert_eq!(MasteryLevel::from_score(3.0), MasteryLevel::Improving);
    assert_eq!(MasteryLevel::from_score(4.99), MasteryLevel::Improving);
    assert_eq!(MasteryLevel::from_score(5.0), MasteryLevel::Strong);
}

// ── Revisit update rule ──────────────────────────────────────────────────

#[test]
fn three_day_revisit_decays_then_reinforces() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();
    let mut cluster = make_cluster(2.0, 3);

    engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity: 0.9 }, now);

    // 2.0 - 0.1*3 = 1.7, +0.5 revisit, +0.9*0.8 similarity, +1.0 spacing.
    let expected = 1.7 + 0.5 + 0.72 + 1.0;
    assert!((cluster.confidence_score.value() - expected).abs() < 1e-9);
    // Reinforcement exceeded decay: strictly higher than the pre-decay value.
    assert!(cluster.confidence_score.value() > 2.0);
    assert_eq!(cluster.last_seen, now);
}

#[test]
fn label_always_matches_score_after_update() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();
    for (score, days, sim) in [(0.0, 0, 0.0), (2.9, 1, 0.99), (4.4, 7, 0.86), (5.9, 20, 0.5)] {
        let mut cluster = make_cluster(score, days);
        engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity: sim }, now);
        assert_eq!(cluster.confidence, cluster.confidence_score.label());
    }
}

#[test]
fn spacing_bonus_applies_only_inside_the_window() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();

    let score_after = |days: i64| {
        let mut cluster = make_cluster(3.0, days);
        engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity: 0.0 }, now);
        cluster.confidence_score.value()
    };

    // Inside the window the +1.0 bonus more than offsets one extra day of decay.
    assert!(score_after(2) > score_after(1));
    assert!(score_after(14) > score_after(15) + 0.5);

    // Exact arithmetic at the edges.
    assert!((score_after(1) - (3.0 - 0.1 + 0.5)).abs() < 1e-9);
    assert!((score_after(2) - (3.0 - 0.2 + 0.5 + 1.0)).abs() < 1e-9);
    assert!((score_after(15) - (3.0 - 1.5 + 0.5)).abs() < 1e-9);
}

#[test]
fn score_never_exceeds_the_cap() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();
    let mut cluster = make_cluster(5.9, 2);
    engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity: 1.0 }, now);
    assert_eq!(cluster.confidence_score.value(), 6.0);
    assert_eq!(cluster.confidence, MasteryLevel::Strong);
}

#[test]
fn heavy_decay_floors_at_zero_before_reinforcement() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();
    let mut cluster = make_cluster(1.0, 60);
    engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity: 0.0 }, now);
    // Decay floors at 0.0 (not -5.0); only the revisit bonus remains.
    assert!((cluster.confidence_score.value() - 0.5).abs() < 1e-9);
}

#[test]
fn last_seen_advances_on_every_branch() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();

    let mut revisit = make_cluster(1.0, 5);
    engine.reinforce(&mut revisit, Reinforcement::Revisit { similarity: 0.2 }, now);
    assert_eq!(revisit.last_seen, now);

    let mut signalled = make_cluster(1.0, 5);
    engine.reinforce(&mut signalled, Reinforcement::Signals(&[]), now);
    assert_eq!(signalled.last_seen, now);
}

// ── Signal reinforcement ─────────────────────────────────────────────────

#[test]
fn signal_reinforcement_sums_weights_with_a_cap() {
    let engine = ConfidenceEngine::default();
    let now = Utc::now();

    let mut cluster = make_cluster(1.0, 0);
    engine.reinforce(
        &mut cluster,
        Reinforcement::Signals(&[SignalKind::FollowUp, SignalKind::SelfCorrection]),
        now,
    );
    // 1.0 + min(1.0 + 2.0, 2.5) = 3.5; no spacing bonus at day 0.
    assert!((cluster.confidence_score.value() - 3.5).abs() < 1e-9);
    assert_eq!(cluster.confidence, MasteryLevel::Improving);
}

// ── New-cluster initialization ───────────────────────────────────────────

#[test]
fn cold_start_initializes_at_the_flat_base() {
    let engine = ConfidenceEngine::default();
    let score = engine.initial_score(0.0);
    assert!((score.value() - 0.5).abs() < 1e-9);
    assert_eq!(score.label(), MasteryLevel::Weak);
}

#[test]
fn near_miss_starts_warmer_than_a_cold_concept() {
    let engine = ConfidenceEngine::default();
    // Best similarity 0.8 was below the 0.85 threshold, but still warms the start.
    let warm = engine.initial_score(0.8);
    assert!((warm.value() - (0.5 + 0.8 * 0.5)).abs() < 1e-9);
    assert!(warm.value() > engine.initial_score(0.0).value());
}

#[test]
fn negative_similarity_does_not_cool_below_the_base() {
    let engine = ConfidenceEngine::default();
    assert!((engine.initial_score(-0.4).value() - 0.5).abs() < 1e-9);
}

// ── Custom config flows through ──────────────────────────────────────────

#[test]
fn custom_decay_rate_is_honored() {
    let engine = ConfidenceEngine::new(ScoringConfig {
        decay_per_day: 0.5,
        ..ScoringConfig::default()
    });
    let now = Utc::now();
    let mut cluster = make_cluster(4.0, 1);
    engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity: 0.0 }, now);
    assert!((cluster.confidence_score.value() - (4.0 - 0.5 + 0.5)).abs() < 1e-9);
}
