//! # mastery-classify
//!
//! Client side of the subject/concept oracle. The oracle is asked for JSON
//! but is a language model, so its output is treated as semi-structured
//! text: the parser digs the first JSON object out of whatever came back
//! and falls back to `General` with no concept name on any deviation.

mod client;
mod parse;

pub use client::ChatClassifier;
pub use parse::parse_classification;
