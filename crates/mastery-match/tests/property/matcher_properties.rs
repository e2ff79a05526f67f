use chrono::Utc;
use mastery_core::cluster::{ConceptCluster, Embedding, Score, Subject};
use mastery_match::{cosine_similarity, find_best_match};
use proptest::prelude::*;

fn make_cluster(values: Vec<f32>) -> ConceptCluster {
    ConceptCluster::new(
        1,
        Subject::Science,
        Embedding::new(values),
        None,
        Score::new(1.0),
        Utc::now(),
    )
}

fn arb_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dim)
}

proptest! {
    #[test]
    fn similarity_is_within_cosine_range(a in arb_vector(8), b in arb_vector(8)) {
        let sim = cosine_similarity(&a, &b);
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&sim));
    }

    #[test]
    fn similarity_is_symmetric(a in arb_vector(8), b in arb_vector(8)) {
        let lhs = cosine_similarity(&a, &b);
        let rhs = cosine_similarity(&b, &a);
        prop_assert!((lhs - rhs).abs() < 1e-9);
    }

    #[test]
    fn best_match_is_actually_the_max(
        query in arb_vector(8),
        candidates in prop::collection::vec(arb_vector(8), 1..12),
    ) {
        let clusters: Vec<_> = candidates.into_iter().map(make_cluster).collect();
        let q = Embedding::new(query);
        let m = find_best_match(&q, &clusters).unwrap();
        for c in &clusters {
            let sim = cosine_similarity(q.as_slice(), c.embedding.as_slice());
            prop_assert!(sim <= m.similarity + 1e-12);
        }
    }
}
