use serde::{Deserialize, Serialize};

use crate::errors::{MasteryResult, StorageError};

/// Fixed-length semantic fingerprint of a message.
///
/// Vectors are unit-normalized at construction time via [`Embedding::normalized`];
/// a zero vector stays zero rather than dividing by its norm. Stored as raw
/// little-endian f32 bytes with the dimensionality recorded alongside, and
/// validated loudly on read: a mismatched blob is corruption, never something
/// to truncate or pad over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wrap raw values without normalizing.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Wrap and unit-normalize. A zero vector is returned unchanged.
    pub fn normalized(values: Vec<f32>) -> Self {
        let norm = values.iter().map(|v| (*v as f64).powi(2)).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self(values);
        }
        Self(values.iter().map(|v| (*v as f64 / norm) as f32).collect())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as little-endian f32 bytes for blob storage.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.0.len() * 4);
        for v in &self.0 {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    /// Decode from blob bytes, validating the dimensionality.
    ///
    /// Fails if the byte length is not a whole number of f32s or if the
    /// decoded length differs from `expected_dim`.
    pub fn from_bytes(bytes: &[u8], expected_dim: usize) -> MasteryResult<Self> {
        if bytes.len() % 4 != 0 {
            return Err(StorageError::MalformedEmbedding { len: bytes.len() }.into());
        }
        let actual = bytes.len() / 4;
        if actual != expected_dim {
            return Err(StorageError::DimensionMismatch {
                expected: expected_dim,
                actual,
            }
            .into());
        }
        let values = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self(values))
    }
}
