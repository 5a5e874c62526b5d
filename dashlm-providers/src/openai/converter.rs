//! Request conversion for OpenAI-compatible services

use crate::traits::RequestConverter;
use async_trait::async_trait;
use dashlm_core::{EmbeddingRequest, Error, Message, Parameters, Request};
use serde_json::{json, Value};

/// Converts generic requests to the chat-completions body
#[derive(Debug, Clone)]
pub struct OpenAIConverter {
    /// Used when the request does not name a model
    pub default_model: String,
    /// Fills parameters the request leaves unset
    pub default_parameters: Parameters,
}

#[async_trait]
impl RequestConverter for OpenAIConverter {
    async fn convert_request(&self, request: Request) -> Result<Value, Error> {
        if request.messages.is_empty() {
            return Err(Error::Validation(
                "Request must contain at least one message".to_string(),
            ));
        }

        let model = match &request.model {
            Some(model) => model.to_string(),
            None => self.default_model.clone(),
        };

        let mut body = json!({
            "model": model,
            "messages": self.convert_messages(&request.messages),
            "stream": false,
        });

        // Add parameters
        let params = &request.parameters.or(&self.default_parameters);
        if let Some(max_tokens) = params.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = params.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = params.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(stop) = &params.stop {
            body["stop"] = json!(stop);
        }
        if let Some(presence_penalty) = params.presence_penalty {
            body["presence_penalty"] = json!(presence_penalty);
        }
        if let Some(frequency_penalty) = params.frequency_penalty {
            body["frequency_penalty"] = json!(frequency_penalty);
        }
        if let Some(seed) = params.seed {
            body["seed"] = json!(seed);
        }

        if let Some(format) = &request.response_format {
            body["response_format"] = serde_json::to_value(format)?;
        }

        Ok(body)
    }
}

impl OpenAIConverter {
    fn convert_messages(&self, messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.as_str(),
                    "content": msg.content,
                })
            })
            .collect()
    }

    /// Convert an embedding request to the `/embeddings` body
    pub fn convert_embedding_request(&self, request: &EmbeddingRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "input": request.input,
            "encoding_format": "float",
        });
        if let Some(dimensions) = request.dimensions {
            body["dimensions"] = json!(dimensions);
        }
        body
    }
}
