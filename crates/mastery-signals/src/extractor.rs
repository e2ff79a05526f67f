use mastery_core::cluster::SignalKind;
use mastery_core::traits::ISignalExtractor;

use crate::patterns;

/// Regex-backed signal extractor. Each kind fires at most once per message,
/// no matter how many of its phrases match.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSignalExtractor;

impl RegexSignalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ISignalExtractor for RegexSignalExtractor {
    fn extract(&self, message: &str) -> Vec<SignalKind> {
        let mut kinds = Vec::new();
        if patterns::FOLLOW_UP.is_match(message) {
            kinds.push(SignalKind::FollowUp);
        }
        if patterns::SELF_CORRECTION.is_match(message) {
            kinds.push(SignalKind::SelfCorrection);
        }
        if patterns::CROSS_TOPIC.is_match(message) {
            kinds.push(SignalKind::CrossTopicTransfer);
        }
        kinds
    }
}
