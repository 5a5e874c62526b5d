//! Reply format selection

use serde::{Deserialize, Serialize};

/// Format specification for structured responses.
///
/// Serializes to the `response_format` object of an OpenAI-compatible
/// chat-completions body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text (the service default)
    #[default]
    Text,
    /// Request any valid JSON object response.
    JsonObject,
}
