//! Core provider traits for LLM interactions

use crate::error::{Error, Result};
use crate::types::embedding::{EmbeddingRequest, EmbeddingResponse};
use crate::types::request::Request;
use crate::types::response::Response;
use crate::types::stream::StreamEvent;
use async_trait::async_trait;

/// The fundamental trait for chat-completion interactions
///
/// A provider is an explicitly constructed handle to one hosted service. It
/// supports both request/response and streaming interactions; each call
/// issues exactly one outbound request.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The stream type returned by this provider
    type Stream: futures_core::Stream<Item = Result<StreamEvent>> + Send + Unpin;

    /// Send a request and get a complete response
    async fn request(&self, request: Request) -> Result<Response>;

    /// Send a request and get a stream of events
    ///
    /// The stream is finite and single-pass. Dropping it before the end
    /// abandons the underlying connection.
    async fn stream(&self, request: Request) -> Result<Self::Stream>;
}

/// Trait for services that turn text into fixed-length vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name used in logs and errors
    fn name(&self) -> &str;

    /// The model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Embed a batch of texts
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Embed several documents with the default model
    async fn embed_documents(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest::new(self.default_model(), texts);
        Ok(self.embed(request).await?.into_vectors())
    }

    /// Embed a single query with the default model
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_documents(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Response {
                message: format!("{} returned no embedding", self.name()),
            })
    }
}
