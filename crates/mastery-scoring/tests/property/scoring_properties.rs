use chrono::{Duration, Utc};
use mastery_core::cluster::{ConceptCluster, Embedding, Score, SignalKind, Subject};
use mastery_core::constants::MAX_CONFIDENCE;
use mastery_scoring::{ConfidenceEngine, Reinforcement};
use proptest::prelude::*;

fn make_cluster(score: f64, days_ago: i64) -> ConceptCluster {
    ConceptCluster::new(
        1,
        Subject::Science,
        Embedding::normalized(vec![0.5, 0.5]),
        None,
        Score::new(score),
        Utc::now() - Duration::days(days_ago),
    )
}

fn arb_signals() -> impl Strategy<Value = Vec<SignalKind>> {
    prop::collection::vec(
        prop_oneof![
            Just(SignalKind::FollowUp),
            Just(SignalKind::SelfCorrection),
            Just(SignalKind::CrossTopicTransfer),
        ],
        0..4,
    )
}

proptest! {
    #[test]
    fn score_stays_within_bounds(
        score in 0.0f64..MAX_CONFIDENCE,
        days in 0i64..365,
        similarity in -1.0f64..1.0,
    ) {
        let engine = ConfidenceEngine::default();
        let mut cluster = make_cluster(score, days);
        engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity }, Utc::now());
        prop_assert!(cluster.confidence_score.value() >= 0.0);
        prop_assert!(cluster.confidence_score.value() <= MAX_CONFIDENCE);
    }

    #[test]
    fn label_matches_score_after_any_update(
        score in 0.0f64..MAX_CONFIDENCE,
        days in 0i64..365,
        signals in arb_signals(),
    ) {
        let engine = ConfidenceEngine::default();
        let mut cluster = make_cluster(score, days);
        engine.reinforce(&mut cluster, Reinforcement::Signals(&signals), Utc::now());
        prop_assert_eq!(cluster.confidence, cluster.confidence_score.label());
    }

    #[test]
    fn no_update_sequence_breaks_the_cap(
        score in 0.0f64..MAX_CONFIDENCE,
        similarities in prop::collection::vec(0.0f64..1.0, 1..20),
    ) {
        let engine = ConfidenceEngine::default();
        let mut cluster = make_cluster(score, 0);
        for similarity in similarities {
            engine.reinforce(&mut cluster, Reinforcement::Revisit { similarity }, Utc::now());
            prop_assert!(cluster.confidence_score.value() <= MAX_CONFIDENCE);
        }
    }

    #[test]
    fn decay_is_monotonic_in_elapsed_days(
        score in 1.0f64..MAX_CONFIDENCE,
        days_a in 0i64..180,
        days_b in 0i64..180,
    ) {
        // Fixed reinforcement inputs; only the elapsed gap varies.
        // Outside the spacing window so the bonus doesn't mask decay.
        let (short, long) = if days_a <= days_b { (days_a, days_b) } else { (days_b, days_a) };
        prop_assume!(short > 14 || long <= 1);

        let engine = ConfidenceEngine::default();
        let now = Utc::now();

        let mut fresh = make_cluster(score, short);
        let mut stale = make_cluster(score, long);
        engine.reinforce(&mut fresh, Reinforcement::Revisit { similarity: 0.3 }, now);
        engine.reinforce(&mut stale, Reinforcement::Revisit { similarity: 0.3 }, now);

        prop_assert!(stale.confidence_score.value() <= fresh.confidence_score.value() + 1e-9);
    }
}
