//! # mastery-embeddings
//!
//! Client side of the external embedder collaborator: an HTTP provider
//! speaking the OpenAI embeddings wire shape, wrapped in an engine that
//! caches by content hash. Both implement `IEmbeddingProvider`, so the
//! pipeline never knows whether a cache sits in front of the network.

mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use providers::HttpEmbeddings;
