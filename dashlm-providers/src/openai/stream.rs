//! Streaming implementation for OpenAI-compatible services

use crate::http::ResponseStream;
use crate::openai::parser::OpenAIParser;
use crate::stream_utils::SseStream;
use dashlm_core::{Error, StreamEvent};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// OpenAI-compatible streaming response
///
/// Yields a metadata event for the opening chunk, one content event per
/// non-empty delta and [`StreamEvent::Done`] for the `[DONE]` sentinel.
pub struct OpenAIStream {
    inner: SseStream<OpenAIParser>,
}

impl OpenAIStream {
    /// Create a new stream over a raw response body
    pub fn new(body: ResponseStream) -> Self {
        Self {
            inner: SseStream::new(body, OpenAIParser),
        }
    }
}

impl Stream for OpenAIStream {
    type Item = Result<StreamEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
