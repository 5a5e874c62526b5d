//! OpenAI-compatible provider implementation

pub(crate) mod config;
mod converter;
mod parser;
mod provider;
mod stream;


pub use config::OpenAIConfig;
pub use provider::OpenAI;
pub use stream::OpenAIStream;
