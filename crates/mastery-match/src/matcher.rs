use mastery_core::cluster::{ConceptCluster, Embedding};

use crate::cosine::cosine_similarity;

/// The winning candidate from a similarity scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Index into the candidate slice passed to [`find_best_match`].
    pub index: usize,
    /// Cosine similarity of that candidate to the query, in [-1.0, 1.0].
    pub similarity: f64,
}

/// Scan one subject's clusters for the best cosine match to `query`.
///
/// Returns `None` for an empty candidate list (the caller treats that as
/// similarity 0.0). Tie-break: the first candidate in stored order wins;
/// the scan only replaces the leader on a strictly greater similarity, which
/// keeps results deterministic and reproducible across runs.
pub fn find_best_match(query: &Embedding, clusters: &[ConceptCluster]) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;
    for (index, cluster) in clusters.iter().enumerate() {
        let similarity = cosine_similarity(query.as_slice(), cluster.embedding.as_slice());
        let leads = match best {
            Some(b) => similarity > b.similarity,
            None => true,
        };
        if leads {
            best = Some(BestMatch { index, similarity });
        }
    }
    best
}
