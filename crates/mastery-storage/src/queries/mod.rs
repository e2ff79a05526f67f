//! Row-level query modules, one per table family. All timestamps are stored
//! as RFC 3339 TEXT in UTC.

pub mod cluster_ops;
pub mod progress;
pub mod signal_ops;
pub mod subject_ops;

use chrono::{DateTime, Utc};

use mastery_core::cluster::{MasteryLevel, Subject};
use mastery_core::errors::MasteryResult;

use crate::to_storage_err;

/// Parse a stored RFC 3339 timestamp back into UTC.
pub(crate) fn parse_ts(raw: &str) -> MasteryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw:?}: {e}")))
}

/// Parse a stored subject name. An unknown name is corruption, not a
/// fallback case; the `General` rule applies at the classifier boundary,
/// never to data we wrote ourselves.
pub(crate) fn parse_subject(raw: &str) -> MasteryResult<Subject> {
    Subject::from_name(raw).ok_or_else(|| to_storage_err(format!("unknown subject {raw:?}")))
}

/// Parse a stored mastery label.
pub(crate) fn parse_level(raw: &str) -> MasteryResult<MasteryLevel> {
    MasteryLevel::from_name(raw)
        .ok_or_else(|| to_storage_err(format!("unknown mastery level {raw:?}")))
}
