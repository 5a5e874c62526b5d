//! Core types used throughout the dashlm library

pub mod embedding;
pub mod message;
pub mod request;
pub mod response;
pub mod stream;
pub mod structured;

// Common type aliases
/// A model identifier (e.g., "qwen3-max", "text-embedding-v3")
pub type ModelId = String;
