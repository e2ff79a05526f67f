use chrono::{DateTime, Utc};
use mastery_core::cluster::Score;

/// Whole days elapsed between two timestamps, clamped to zero for clock skew.
pub fn elapsed_days(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_seen).num_days().max(0)
}

/// Forgetting-curve decay: subtract `rate_per_day` per elapsed whole day,
/// floored at 0.0. Applied before any reinforcement.
pub fn apply(score: Score, elapsed_days: i64, rate_per_day: f64) -> f64 {
    (score.value() - rate_per_day * elapsed_days as f64).max(0.0)
}
