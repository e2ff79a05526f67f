//! Compiled pattern sets, one per signal kind. Matching is case-insensitive
//! over the raw message text.

use once_cell::sync::Lazy;
use regex::RegexSet;

/// Phrases that mark a follow-up question on something just discussed.
pub static FOLLOW_UP: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\bwhat about\b",
        r"(?i)\bwhat if\b",
        r"(?i)\bbut why\b",
        r"(?i)\bwhy does\b",
        r"(?i)\bcan you explain\b",
        r"(?i)\btell me more\b",
        r"(?i)\bgo deeper\b",
        r"(?i)\banother example\b",
        r"(?i)\bstill (don'?t|do not) (get|understand)\b",
        r"(?i)\bfollow[- ]up\b",
    ])
    .expect("follow-up patterns must compile")
});

/// Phrases where the user catches and fixes their own mistake.
pub static SELF_CORRECTION: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\boh wait\b",
        r"(?i)\bwait,? no\b",
        r"(?i)\bi meant\b",
        r"(?i)\bi was wrong\b",
        r"(?i)\bmy (mistake|bad)\b",
        r"(?i)\bactually,? i think i\b",
        r"(?i)\bnever ?mind,? i\b",
        r"(?i)\bscratch that\b",
        r"(?i)\bnow i see\b",
        r"(?i)\bi mixed (it|them|that) up\b",
    ])
    .expect("self-correction patterns must compile")
});

/// Phrases that connect the current topic to a different one.
pub static CROSS_TOPIC: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\bjust like (in|with|when)\b",
        r"(?i)\bsimilar to\b",
        r"(?i)\breminds me of\b",
        r"(?i)\bsame (idea|thing) as\b",
        r"(?i)\blike we (did|saw|learned) (in|with)\b",
        r"(?i)\bis (this|that) related to\b",
        r"(?i)\bconnects? to\b",
    ])
    .expect("cross-topic patterns must compile")
});
