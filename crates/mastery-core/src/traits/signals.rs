use crate::cluster::SignalKind;

/// Optional capability: extract behavioral signals from message text.
///
/// Pure pattern matching; implementations must not block on any external
/// call. Returned kinds are deduplicated.
pub trait ISignalExtractor: Send + Sync {
    fn extract(&self, message: &str) -> Vec<SignalKind>;
}
