//! Core traits and types for the dashlm LLM library
//!
//! This crate provides the fundamental abstractions shared by the provider
//! implementations and the high-level client: messages, requests, responses,
//! stream events, embedding payloads and the error type.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use provider::{EmbeddingProvider, Provider};
pub use types::{
    embedding::{Embedding, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage},
    message::{Message, Role},
    request::{BuildError, Model, Parameters, ParametersBuilder, Request, RequestBuilder},
    response::{FinishReason, Response, ResponseMetadata, Usage},
    stream::{ContentDelta, MetadataDelta, StreamAccumulator, StreamEvent},
    structured::ResponseFormat,
};
