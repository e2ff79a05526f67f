use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical mastery label derived from a confidence score.
///
/// The bucketing is a total function over the real line:
/// `score < 3.0` → Weak, `3.0 <= score < 5.0` → Improving, `score >= 5.0` → Strong.
/// Boundaries are closed on the right bucket: exactly 3.0 is Improving,
/// exactly 5.0 is Strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasteryLevel {
    Weak,
    Improving,
    Strong,
}

impl MasteryLevel {
    /// Score below which mastery is Weak.
    pub const IMPROVING_FLOOR: f64 = 3.0;
    /// Score at or above which mastery is Strong.
    pub const STRONG_FLOOR: f64 = 5.0;

    /// Deterministic bucketing of a raw score.
    pub fn from_score(score: f64) -> MasteryLevel {
        if score < Self::IMPROVING_FLOOR {
            MasteryLevel::Weak
        } else if score < Self::STRONG_FLOOR {
            MasteryLevel::Improving
        } else {
            MasteryLevel::Strong
        }
    }

    /// Canonical name, as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            MasteryLevel::Weak => "Weak",
            MasteryLevel::Improving => "Improving",
            MasteryLevel::Strong => "Strong",
        }
    }

    /// Parse a stored label. Returns `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Option<MasteryLevel> {
        match name {
            "Weak" => Some(MasteryLevel::Weak),
            "Improving" => Some(MasteryLevel::Improving),
            "Strong" => Some(MasteryLevel::Strong),
            _ => None,
        }
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
