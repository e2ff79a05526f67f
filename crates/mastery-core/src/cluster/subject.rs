use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of tracked subject areas.
///
/// `General` doubles as the fallback bucket for anything the classifier
/// cannot place (or any malformed classifier output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Math,
    Science,
    English,
    General,
}

impl Subject {
    /// All subjects, in display order.
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::Science,
        Subject::English,
        Subject::General,
    ];

    /// Canonical name, as stored in the database and shown to users.
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::General => "General",
        }
    }

    /// Parse a subject name leniently (case-insensitive).
    /// Returns `None` for anything outside the closed set; callers that
    /// need the fallback rule use `from_name_or_general`.
    pub fn from_name(name: &str) -> Option<Subject> {
        Subject::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Parse with the classifier fallback rule: unknown names map to `General`.
    pub fn from_name_or_general(name: &str) -> Subject {
        Subject::from_name(name).unwrap_or(Subject::General)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
