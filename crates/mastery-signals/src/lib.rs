//! # mastery-signals
//!
//! Rule-based extraction of behavioral learning signals (follow-up,
//! self-correction, cross-topic transfer) from raw message text.
//! Pure pattern matching over compiled regex sets, with no external calls, so
//! this stage can never block the pipeline.

mod extractor;
mod patterns;

pub use extractor::RegexSignalExtractor;
