//! Response parsing for OpenAI-compatible services

use crate::error;
use crate::traits::{ResponseParser, StreamEventParser};
use async_trait::async_trait;
use dashlm_core::{
    ContentDelta, Embedding, EmbeddingResponse, EmbeddingUsage, Error, FinishReason,
    MetadataDelta, Response, ResponseMetadata, StreamEvent, Usage,
};
use serde::Deserialize;
use serde_json::Value;

/// Parses OpenAI-compatible responses
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAIParser;

#[async_trait]
impl ResponseParser for OpenAIParser {
    async fn parse_response(&self, value: Value) -> Result<Response, Error> {
        let response: OpenAIResponse =
            serde_json::from_value(value).map_err(error::serialization_error)?;

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(Error::Response {
                message: "No choices in response".to_string(),
            });
        };

        let metadata = ResponseMetadata {
            model: response.model,
            id: response.id,
            usage: response.usage.map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason.as_deref().map(parse_finish_reason),
            ..Default::default()
        };

        Ok(Response {
            content: choice.message.content.unwrap_or_default(),
            metadata,
        })
    }
}

impl StreamEventParser for OpenAIParser {
    fn parse_event(&self, data: &str) -> Result<Option<StreamEvent>, Error> {
        let data = data.trim();
        if data == "[DONE]" {
            return Ok(Some(StreamEvent::Done));
        }
        if data.is_empty() {
            return Ok(None);
        }

        let chunk: StreamChunk = serde_json::from_str(data).map_err(error::serialization_error)?;

        if let Some(content) = chunk
            .choices
            .first()
            .and_then(|choice| choice.delta.content.as_ref())
            .filter(|content| !content.is_empty())
        {
            return Ok(Some(StreamEvent::Content(ContentDelta {
                text: content.clone(),
            })));
        }

        // Role-only opening chunk, usage trailer and the like
        if chunk.id.is_some() || chunk.model.is_some() {
            return Ok(Some(StreamEvent::Metadata(MetadataDelta {
                model: chunk.model,
                id: chunk.id,
                ..Default::default()
            })));
        }

        Ok(None)
    }
}

impl OpenAIParser {
    /// Parse an `/embeddings` reply, ordering vectors by input index
    pub fn parse_embeddings(&self, value: Value) -> Result<EmbeddingResponse, Error> {
        let response: OpenAIEmbeddingResponse =
            serde_json::from_value(value).map_err(error::serialization_error)?;

        let mut embeddings: Vec<Embedding> = response
            .data
            .into_iter()
            .map(|d| Embedding {
                index: d.index,
                vector: d.embedding,
            })
            .collect();
        embeddings.sort_by_key(|e| e.index);

        Ok(EmbeddingResponse {
            embeddings,
            model: response.model.unwrap_or_default(),
            usage: response.usage.map(|u| EmbeddingUsage {
                total_tokens: u.total_tokens,
            }),
        })
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Response structures
#[derive(Deserialize)]
struct OpenAIResponse {
    id: Option<String>,
    model: Option<String>,
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// Streaming structures
#[derive(Deserialize)]
struct StreamChunk {
    id: Option<String>,
    model: Option<String>,
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: DeltaContent,
}

#[derive(Deserialize)]
struct DeltaContent {
    content: Option<String>,
}

// Embedding structures
#[derive(Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<EmbeddingData>,
    model: Option<String>,
    usage: Option<EmbeddingUsageInfo>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingUsageInfo {
    total_tokens: u32,
}
