//! Common streaming utilities for server-sent event replies

use crate::http::ResponseStream;
use crate::traits::StreamEventParser;
use dashlm_core::{Error, StreamEvent};
use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Buffer management for line-based streaming protocols
///
/// Bytes are buffered until a newline arrives, so a multi-byte character
/// split across two network chunks is decoded intact.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    /// Create a new line buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add data to buffer and return complete, non-empty lines
    pub fn add_data(&mut self, data: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(data);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw).trim().to_string();
            if !line.is_empty() {
                lines.push(line);
            }
        }

        lines
    }

    /// Get any remaining data in the buffer
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&rest).trim().to_string();
        (!line.is_empty()).then_some(line)
    }
}

/// Common SSE (Server-Sent Events) parsing logic
///
/// Returns the field name and value of a line, or `None` for comments and
/// lines without a field separator.
pub fn parse_sse_line(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(':') {
        return None;
    }
    let pos = line.find(':')?;
    let (field, value) = line.split_at(pos);
    let value = value.get(1..)?.trim_start();
    Some((field, value))
}

/// Event stream decoded from a raw SSE byte stream
///
/// Each `data:` payload is handed to the provider's parser. The stream ends
/// after the parser yields [`StreamEvent::Done`] or the body closes.
pub struct SseStream<P> {
    inner: ResponseStream,
    parser: P,
    lines: LineBuffer,
    pending: VecDeque<String>,
    finished: bool,
}

impl<P: StreamEventParser> SseStream<P> {
    /// Wrap a raw body stream
    pub fn new(inner: ResponseStream, parser: P) -> Self {
        Self {
            inner,
            parser,
            lines: LineBuffer::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn next_pending_event(&mut self) -> Option<Result<StreamEvent, Error>> {
        while let Some(line) = self.pending.pop_front() {
            let Some(("data", data)) = parse_sse_line(&line) else {
                continue;
            };
            match self.parser.parse_event(data) {
                Ok(Some(event)) => {
                    if event == StreamEvent::Done {
                        self.finished = true;
                        self.pending.clear();
                    }
                    tracing::trace!(?event, "stream event");
                    return Some(Ok(event));
                }
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

impl<P: StreamEventParser + Unpin> Stream for SseStream<P> {
    type Item = Result<StreamEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(event) = this.next_pending_event() {
                return Poll::Ready(Some(event));
            }
            if this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    this.pending.extend(this.lines.add_data(&chunk));
                }
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(crate::error::network_error(e))));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    if let Some(rest) = this.lines.flush() {
                        this.pending.push_back(rest);
                        if let Some(event) = this.next_pending_event() {
                            return Poll::Ready(Some(event));
                        }
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::StreamExt;

    struct EchoParser;

    impl StreamEventParser for EchoParser {
        fn parse_event(&self, data: &str) -> Result<Option<StreamEvent>, Error> {
            match data {
                "[DONE]" => Ok(Some(StreamEvent::Done)),
                "" => Ok(None),
                "bad" => Err(Error::Serialization {
                    message: "bad".into(),
                    source: None,
                }),
                text => Ok(Some(StreamEvent::content(text))),
            }
        }
    }

    fn body(chunks: Vec<&'static str>) -> ResponseStream {
        Box::pin(futures::stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok(Bytes::from_static(c.as_bytes()))),
        ))
    }

    #[test]
    fn test_line_buffer_splits_lines() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.add_data(b"data: a").is_empty());
        assert_eq!(buffer.add_data(b"bc\n\ndata: d\n"), vec!["data: abc", "data: d"]);
        assert_eq!(buffer.flush(), None);
    }

    #[test]
    fn test_line_buffer_keeps_split_multibyte_characters() {
        let bytes = "data: 你好\n".as_bytes();
        let mut buffer = LineBuffer::new();
        // split inside the first character
        assert!(buffer.add_data(&bytes[..8]).is_empty());
        assert_eq!(buffer.add_data(&bytes[8..]), vec!["data: 你好"]);
    }

    #[test]
    fn test_line_buffer_flush() {
        let mut buffer = LineBuffer::new();
        buffer.add_data(b"data: tail");
        assert_eq!(buffer.flush(), Some("data: tail".to_string()));
        assert_eq!(buffer.flush(), None);
    }

    #[test]
    fn test_parse_sse_line() {
        assert_eq!(parse_sse_line("data: {\"a\":1}"), Some(("data", "{\"a\":1}")));
        assert_eq!(parse_sse_line("data:[DONE]"), Some(("data", "[DONE]")));
        assert_eq!(parse_sse_line("event: message"), Some(("event", "message")));
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("garbage"), None);
    }

    #[test]
    fn test_sse_stream_decodes_events() {
        let stream = SseStream::new(
            body(vec!["data: Hel", "lo\n\n: ping\nid: 1\ndata: world\n\ndata: [DONE]\n\ndata: late\n"]),
            EchoParser,
        );
        let events: Vec<_> = tokio_test::block_on(stream.collect::<Vec<_>>());
        let events: Vec<StreamEvent> = events.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            events,
            vec![
                StreamEvent::content("Hello"),
                StreamEvent::content("world"),
                StreamEvent::Done
            ]
        );
    }

    #[test]
    fn test_sse_stream_flushes_unterminated_last_line() {
        let stream = SseStream::new(body(vec!["data: one\n", "data: two"]), EchoParser);
        let events: Vec<_> = tokio_test::block_on(stream.collect::<Vec<_>>());
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].as_ref().unwrap().as_text(), Some("two"));
    }

    #[test]
    fn test_sse_stream_surfaces_parse_errors() {
        let stream = SseStream::new(body(vec!["data: bad\ndata: ok\n"]), EchoParser);
        let events: Vec<_> = tokio_test::block_on(stream.collect::<Vec<_>>());
        assert!(events[0].is_err());
        assert_eq!(events[1].as_ref().unwrap().as_text(), Some("ok"));
    }
}
