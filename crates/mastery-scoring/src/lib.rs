//! # mastery-scoring
//!
//! Confidence dynamics for concept clusters: time decay, revisit and
//! signal-based reinforcement, the spaced-repetition bonus, and the
//! subject-level mastery aggregate. Everything here is synchronous pure CPU;
//! suspension points live in the pipeline, not in scoring.

pub mod aggregate;
mod decay;
mod engine;
mod reinforcement;

pub use engine::{ConfidenceEngine, Reinforcement};
