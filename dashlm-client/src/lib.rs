//! High-level client API for LLM interactions
//!
//! This crate provides a simplified interface over any [`Provider`]:
//! one-shot and streaming chat, a background fragment channel with
//! cancellation, output sinks for streamed text, and few-shot extraction
//! of flat records.
//!
//! [`Provider`]: dashlm_core::Provider

mod builder;
mod client;
pub mod extract;
pub mod fragments;
pub mod normalize;
pub mod sink;

pub use builder::RequestBuilder;
pub use client::{Client, ConnectedRequestBuilder, FragmentStream, MessageInput};
pub use extract::{Example, ExtractionResult, Extractor, Schema};
pub use fragments::{spawn_fragments, FragmentReceiver};
pub use normalize::NumberNormalizer;
pub use sink::{write_fragments, SseEncoder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{Client, Example, Extractor, RequestBuilder, Schema};
    pub use dashlm_core::{Message, Role};
}
