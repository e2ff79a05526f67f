//! # mastery-pipeline
//!
//! The orchestrator: one invocation per user-authored chat message, stages
//! strictly ordered, invocations for the same (user, subject) serialized,
//! and every write committed atomically. Failures here never reach the
//! chat response; callers that want fire-and-forget semantics use
//! [`LearningPipeline::observe_message`].

mod builder;
mod locks;
mod pipeline;

pub use pipeline::LearningPipeline;
