//! Streaming types for incremental responses

use crate::types::response::{Response, ResponseMetadata};
use std::collections::HashMap;

/// A chunk of content in a stream
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDelta {
    /// The text content
    pub text: String,
}

/// Metadata updates in a stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataDelta {
    /// Model information
    pub model: Option<String>,
    /// Response ID
    pub id: Option<String>,
    /// Custom metadata
    pub custom: HashMap<String, String>,
}

/// Events that can occur during streaming
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Content was generated
    Content(ContentDelta),
    /// Metadata update
    Metadata(MetadataDelta),
    /// Stream has ended
    Done,
}

impl StreamEvent {
    /// Shorthand for a content event
    pub fn content(text: impl Into<String>) -> Self {
        StreamEvent::Content(ContentDelta { text: text.into() })
    }

    /// The text carried by a content event
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StreamEvent::Content(delta) => Some(&delta.text),
            _ => None,
        }
    }
}

/// Accumulates streaming events into a complete response
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    content: String,
    fragments: usize,
    metadata: ResponseMetadata,
    done: bool,
}

impl StreamAccumulator {
    /// Create a new accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a stream event
    pub fn process_event(&mut self, event: StreamEvent) -> crate::error::Result<()> {
        match event {
            StreamEvent::Content(delta) => {
                self.content.push_str(&delta.text);
                self.fragments += 1;
            }
            StreamEvent::Metadata(delta) => {
                if delta.model.is_some() {
                    self.metadata.model = delta.model;
                }
                if delta.id.is_some() {
                    self.metadata.id = delta.id;
                }
                self.metadata.custom.extend(delta.custom);
            }
            StreamEvent::Done => self.done = true,
        }
        Ok(())
    }

    /// Get the accumulated content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of content fragments seen so far
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Whether the end-of-stream sentinel was seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Convert into the equivalent non-streamed response
    pub fn into_response(self) -> Response {
        Response {
            content: self.content,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_in_order() {
        let mut acc = StreamAccumulator::new();
        acc.process_event(StreamEvent::Metadata(MetadataDelta {
            model: Some("qwen3-max".into()),
            id: Some("chatcmpl-1".into()),
            ..Default::default()
        }))
        .unwrap();
        for text in ["你还", "剩", "80元"] {
            acc.process_event(StreamEvent::content(text)).unwrap();
        }
        assert!(!acc.is_done());
        acc.process_event(StreamEvent::Done).unwrap();

        assert!(acc.is_done());
        assert_eq!(acc.fragments(), 3);
        assert_eq!(acc.content(), "你还剩80元");

        let response = acc.into_response();
        assert_eq!(response.content, "你还剩80元");
        assert_eq!(response.metadata.model.as_deref(), Some("qwen3-max"));
        assert_eq!(response.metadata.id.as_deref(), Some("chatcmpl-1"));
    }

    #[test]
    fn test_as_text() {
        assert_eq!(StreamEvent::content("hi").as_text(), Some("hi"));
        assert_eq!(StreamEvent::Done.as_text(), None);
    }
}
