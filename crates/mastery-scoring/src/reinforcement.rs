use mastery_core::cluster::SignalKind;
use mastery_core::config::ScoringConfig;

/// Revisit reinforcement: a flat bonus for coming back, plus a
/// similarity-weighted term for "this really is the same concept".
pub fn revisit_gain(similarity: f64, config: &ScoringConfig) -> f64 {
    config.revisit_bonus + similarity * config.similarity_weight
}

/// Signal reinforcement: sum of per-kind weights, capped at the maximum
/// single-event gain.
pub fn signal_gain(signals: &[SignalKind], config: &ScoringConfig) -> f64 {
    let sum: f64 = signals.iter().map(|k| k.weight()).sum();
    sum.min(config.max_signal_gain)
}
