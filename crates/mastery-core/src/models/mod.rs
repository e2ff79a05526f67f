//! Cross-crate result and transfer types: classifier output, the per-message
//! write set, the caller-facing snapshot, and the progress report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cluster::{
    ConceptCluster, InteractionSignal, MasteryLevel, Score, Subject, SubjectCluster,
};

/// What the subject/concept oracle produced for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub subject: Subject,
    pub concept_name: Option<String>,
}

impl Classification {
    /// The defensive fallback: `General` with no concept name.
    pub fn general() -> Self {
        Self {
            subject: Subject::General,
            concept_name: None,
        }
    }
}

/// Everything one pipeline invocation wants persisted, committed atomically:
/// either every part lands or none does.
#[derive(Debug, Clone)]
pub struct InteractionOutcome {
    pub user_id: i64,
    pub subject: Subject,
    /// The reinforced or freshly created cluster (`id: None` means insert).
    pub cluster: ConceptCluster,
    /// The recomputed subject aggregate (`id: None` means insert).
    pub subject_cluster: SubjectCluster,
    /// Signals detected in the message, if extraction is enabled.
    pub signals: Vec<InteractionSignal>,
}

/// Caller-facing summary of what one message did to the user's mastery state.
#[derive(Debug, Clone, Serialize)]
pub struct MasterySnapshot {
    pub subject: Subject,
    pub learning_skill: MasteryLevel,
    pub concept_name: Option<String>,
    pub concept_confidence: MasteryLevel,
    pub concept_score: Score,
}

/// One concept's progress, as shown on the progress screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptProgress {
    pub name: Option<String>,
    pub confidence: MasteryLevel,
    pub confidence_score: f64,
    pub confidence_delta: f64,
    pub last_seen: DateTime<Utc>,
    pub delta_since: DateTime<Utc>,
}

/// One subject's progress with its concepts nested under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: Subject,
    pub learning_skill: MasteryLevel,
    pub learning_delta: f64,
    pub last_updated: DateTime<Utc>,
    pub delta_since: DateTime<Utc>,
    pub concepts: Vec<ConceptProgress>,
}

/// The full per-user progress report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressReport {
    pub subjects: Vec<SubjectProgress>,
}
