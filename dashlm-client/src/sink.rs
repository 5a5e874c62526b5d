//! Outputs for streamed fragments

use dashlm_core::Result;
use futures::{Stream, StreamExt};
use serde_json::json;
use std::io::Write;

/// Terminal event of an SSE re-encoded reply
pub const SSE_DONE: &str = "data: [DONE]\n\n";

/// Write each fragment as it arrives, flushing after every one
///
/// Returns the full text. The first error from the stream or the writer
/// stops the loop; text already written stays written.
pub async fn write_fragments<S, W>(mut fragments: S, writer: &mut W) -> Result<String>
where
    S: Stream<Item = Result<String>> + Unpin,
    W: Write,
{
    let mut text = String::new();
    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;
        writer.write_all(fragment.as_bytes())?;
        writer.flush()?;
        text.push_str(&fragment);
    }
    Ok(text)
}

/// Re-encodes fragments as server-sent events for browser clients
///
/// Each fragment becomes `data: {"content": "..."}` followed by a blank
/// line, and a successful reply ends with [`SSE_DONE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SseEncoder;

impl SseEncoder {
    /// Encode one fragment
    pub fn encode(fragment: &str) -> String {
        format!("data: {}\n\n", json!({ "content": fragment }))
    }

    /// Encode a fragment stream, skipping empty fragments
    ///
    /// An error is passed through and ends the encoded stream without the
    /// `[DONE]` event.
    pub fn encode_stream<S>(fragments: S) -> impl Stream<Item = Result<String>>
    where
        S: Stream<Item = Result<String>> + Unpin,
    {
        futures::stream::unfold(Some(fragments), |state| async move {
            let mut fragments = state?;
            loop {
                match fragments.next().await {
                    Some(Ok(fragment)) if fragment.is_empty() => continue,
                    Some(Ok(fragment)) => return Some((Ok(Self::encode(&fragment)), Some(fragments))),
                    Some(Err(e)) => return Some((Err(e), None)),
                    None => return Some((Ok(SSE_DONE.to_string()), None)),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashlm_core::Error;
    use futures::stream;
    use pretty_assertions::assert_eq;
    use std::io;

    struct FlushCounter {
        written: Vec<u8>,
        flushes: usize,
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_write_fragments_flushes_each() {
        let mut out = FlushCounter {
            written: Vec::new(),
            flushes: 0,
        };
        let fragments = stream::iter(vec![Ok("Hel".to_string()), Ok("lo".to_string())]);

        let text = write_fragments(fragments, &mut out).await.unwrap();
        assert_eq!(text, "Hello");
        assert_eq!(String::from_utf8(out.written).unwrap(), "Hello");
        assert_eq!(out.flushes, 2);
    }

    #[tokio::test]
    async fn test_write_fragments_stops_on_error() {
        let mut out = Vec::new();
        let fragments = stream::iter(vec![
            Ok("a".to_string()),
            Err(Error::Timeout),
            Ok("b".to_string()),
        ]);

        let result = write_fragments(fragments, &mut out).await;
        assert!(matches!(result, Err(Error::Timeout)));
        assert_eq!(out, b"a");
    }

    #[test]
    fn test_encode_keeps_unicode() {
        assert_eq!(
            SseEncoder::encode("你好\n\"世界\""),
            "data: {\"content\":\"你好\\n\\\"世界\\\"\"}\n\n"
        );
    }

    #[tokio::test]
    async fn test_encode_stream_ends_with_done() {
        let fragments = stream::iter(vec![
            Ok("Hi".to_string()),
            Ok(String::new()),
            Ok("!".to_string()),
        ]);
        let events: Vec<String> = SseEncoder::encode_stream(fragments)
            .map(|e| e.unwrap())
            .collect()
            .await;

        assert_eq!(
            events,
            vec![
                "data: {\"content\":\"Hi\"}\n\n".to_string(),
                "data: {\"content\":\"!\"}\n\n".to_string(),
                SSE_DONE.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_encode_stream_error_has_no_done() {
        let fragments = stream::iter(vec![Ok("Hi".to_string()), Err(Error::Timeout)]);
        let events: Vec<Result<String>> = SseEncoder::encode_stream(fragments).collect().await;

        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Err(Error::Timeout)));
    }
}
