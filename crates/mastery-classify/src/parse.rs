use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use mastery_core::cluster::Subject;
use mastery_core::models::Classification;

/// First `{ ... }` block anywhere in the response, across newlines.
static JSON_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON block pattern must compile"));

/// Loose mirror of the schema the oracle is asked for.
#[derive(Debug, Deserialize)]
struct RawClassification {
    subject: Option<String>,
    concept_name: Option<String>,
}

/// Parse oracle output defensively.
///
/// Never fails: no JSON block, unparseable JSON, a subject outside the
/// closed enum, or a blank concept name all degrade toward
/// `(General, None)` rather than erroring out of the classifier boundary.
pub fn parse_classification(raw: &str) -> Classification {
    let Some(block) = JSON_BLOCK.find(raw) else {
        return Classification::general();
    };

    match serde_json::from_str::<RawClassification>(block.as_str()) {
        Ok(parsed) => Classification {
            subject: parsed
                .subject
                .as_deref()
                .map(Subject::from_name_or_general)
                .unwrap_or(Subject::General),
            concept_name: parsed
                .concept_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        },
        Err(_) => Classification::general(),
    }
}
