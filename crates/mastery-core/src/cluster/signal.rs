use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Behavioral cue extracted from a user's message text.
///
/// Self-correction carries the highest weight: catching and fixing your own
/// mistake is the strongest behavioral evidence of active learning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    FollowUp,
    SelfCorrection,
    CrossTopicTransfer,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [
        SignalKind::FollowUp,
        SignalKind::SelfCorrection,
        SignalKind::CrossTopicTransfer,
    ];

    /// Reinforcement weight contributed when this signal fires.
    pub fn weight(self) -> f64 {
        match self {
            SignalKind::FollowUp => 1.0,
            SignalKind::SelfCorrection => 2.0,
            SignalKind::CrossTopicTransfer => 1.0,
        }
    }

    /// Canonical name, as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::FollowUp => "follow_up",
            SignalKind::SelfCorrection => "self_correction",
            SignalKind::CrossTopicTransfer => "cross_topic_transfer",
        }
    }

    /// Parse a stored name. Returns `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Option<SignalKind> {
        match name {
            "follow_up" => Some(SignalKind::FollowUp),
            "self_correction" => Some(SignalKind::SelfCorrection),
            "cross_topic_transfer" => Some(SignalKind::CrossTopicTransfer),
            _ => None,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected signal, linked to the originating message.
/// Rows are append-only; nothing in the system mutates a persisted signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSignal {
    /// Row id. `None` until persisted.
    pub id: Option<i64>,
    /// Owning user.
    pub user_id: i64,
    pub kind: SignalKind,
    /// Opaque reference to the originating chat message, when the caller has one.
    pub message_ref: Option<String>,
    pub detected_at: DateTime<Utc>,
}

impl InteractionSignal {
    pub fn new(
        user_id: i64,
        kind: SignalKind,
        message_ref: Option<String>,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            kind,
            message_ref,
            detected_at,
        }
    }
}
