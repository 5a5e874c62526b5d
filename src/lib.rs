//! Dashlm - chat, streaming, embeddings and few-shot extraction over hosted LLM APIs
//!
//! This crate bundles a small stack for talking to OpenAI-compatible chat
//! services (DashScope compatible mode, iFlytek MaaS, OpenAI itself) and
//! the DashScope native embedding service.
//!
//! # Features
//!
//! - **Explicit handles**: providers are built from a config, never global
//! - **Streaming**: replies arrive as a lazy sequence of text fragments
//! - **Extraction**: few-shot, JSON-mode extraction onto a fixed schema
//! - **Embeddings**: fixed-length vectors for queries and documents
//!
//! # Quick Start
//!
//! ```no_run
//! # use dashlm::prelude::*;
//! # #[tokio::main]
//! # async fn main() -> Result<(), dashlm::Error> {
//! #     #[cfg(feature = "providers")]
//! #     {
//!     // Reads DASHSCOPE_API_KEY from .env or the environment
//!     let provider = OpenAI::dashscope_from_env()?;
//!
//!     let request = Request::builder()
//!         .message(Message::system("AI助理,简洁回答"))
//!         .message(Message::user("我有100元，买苹果花了20，还有多少？"))
//!         .build();
//!
//!     let response = provider.request(request).await?;
//!     println!("{}", response.content);
//! #     }
//! #     Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use dashlm_core::*;

#[cfg(feature = "providers")]
#[cfg_attr(docsrs, doc(cfg(feature = "providers")))]
pub mod providers {
    //! Provider implementations
    pub use dashlm_providers::*;
}

#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client {
    //! High-level client API
    pub use dashlm_client::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use dashlm_core::{
        EmbeddingProvider, Error, Message, Model, Parameters, Provider, Request, Response, Role,
        StreamAccumulator, StreamEvent,
    };

    #[cfg(feature = "providers")]
    pub use dashlm_providers::{DashScope, DashScopeConfig, OpenAI, OpenAIConfig};

    #[cfg(feature = "client")]
    pub use dashlm_client::{Client, Example, Extractor, RequestBuilder, Schema};
}
