//! # mastery-match
//!
//! The similarity matcher: given a message embedding and one subject's
//! concept clusters, find the best match and its cosine similarity.
//! Pure functions, no side effects; cost is linear in the candidate count,
//! which is why the pipeline scopes candidates to a single (user, subject)
//! before calling in.

mod cosine;
mod matcher;

pub use cosine::cosine_similarity;
pub use matcher::{find_best_match, BestMatch};
