//! # mastery-core
//!
//! Foundation crate for the Mastery learning-tracking engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cluster;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cluster::{
    ConceptCluster, Embedding, InteractionSignal, MasteryLevel, Score, SignalKind, Subject,
    SubjectCluster,
};
pub use config::MasteryConfig;
pub use errors::{MasteryError, MasteryResult};
pub use models::{Classification, InteractionOutcome, MasterySnapshot};
