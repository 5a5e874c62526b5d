//! Embedding request and response types

use serde::{Deserialize, Serialize};

/// Model used for embeddings when none is given
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-v3";

/// A batch of texts to embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Embedding model identifier
    pub model: String,
    /// Texts to embed, in order
    pub input: Vec<String>,
    /// Requested vector length, for models that support several
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

impl EmbeddingRequest {
    /// Create a request for the given model and texts
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            dimensions: None,
        }
    }

    /// Ask for vectors of a specific length
    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// One embedding vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Position of the source text in the request
    pub index: usize,
    /// The vector
    pub vector: Vec<f32>,
}

/// Token accounting for an embedding call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Total tokens consumed
    pub total_tokens: u32,
}

/// Result of an embedding call, ordered by input index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Vectors, one per input text
    pub embeddings: Vec<Embedding>,
    /// Model that produced them
    pub model: String,
    /// Usage, when reported
    pub usage: Option<EmbeddingUsage>,
}

impl EmbeddingResponse {
    /// Shared vector length, or `None` when empty or inconsistent
    pub fn dimension(&self) -> Option<usize> {
        let first = self.embeddings.first()?.vector.len();
        self.embeddings
            .iter()
            .all(|e| e.vector.len() == first)
            .then_some(first)
    }

    /// Drop the metadata and keep the vectors in input order
    pub fn into_vectors(mut self) -> Vec<Vec<f32>> {
        self.embeddings.sort_by_key(|e| e.index);
        self.embeddings.into_iter().map(|e| e.vector).collect()
    }
}
