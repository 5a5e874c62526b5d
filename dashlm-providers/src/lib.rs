//! Provider implementations for OpenAI-compatible and DashScope services

#![warn(missing_docs)]

pub mod builder;
pub mod constants;
pub mod error;
pub mod http;
pub mod stream_utils;
pub mod traits;
pub mod utils;

// Provider implementations
pub mod dashscope;
pub mod openai;

// Re-export provider types
pub use dashscope::{DashScope, DashScopeConfig};
pub use openai::{OpenAI, OpenAIConfig};

// Re-export common traits
pub use builder::{DashScopeBuilder, OpenAIBuilder, ProviderBuilder};
pub use traits::{RequestConverter, ResponseParser, StreamEventParser};
