//! Embedding providers. One today: the HTTP collaborator.

mod http;

pub use http::HttpEmbeddings;
