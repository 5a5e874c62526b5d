//! DashScope native API configuration

use crate::constants::{
    DASHSCOPE_API_BASE_URL, DASHSCOPE_API_KEY_ENV, DASHSCOPE_DEFAULT_EMBEDDING_MODEL,
};
use crate::openai::config::read_key;
use crate::utils::join_url;

const TEXT_EMBEDDING_PATH: &str = "services/embeddings/text-embedding/text-embedding";

/// Configuration for the DashScope native API
#[derive(Debug, Clone)]
pub struct DashScopeConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the native API
    pub base_url: String,
    /// Default embedding model
    pub embedding_model: String,
    /// Output dimension requested from the embedding service
    pub dimension: Option<u32>,
}

impl DashScopeConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DASHSCOPE_API_BASE_URL.to_string(),
            embedding_model: DASHSCOPE_DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: None,
        }
    }

    /// Read the key from `DASHSCOPE_API_KEY` (`.env` first)
    pub fn from_env() -> Self {
        Self::new(read_key(DASHSCOPE_API_KEY_ENV))
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Request a fixed output dimension
    pub fn with_dimension(mut self, dimension: u32) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Get the URL for text embeddings
    pub fn embeddings_url(&self) -> String {
        join_url(&self.base_url, TEXT_EMBEDDING_PATH)
    }
}
