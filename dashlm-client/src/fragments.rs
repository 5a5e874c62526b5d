//! Streamed replies delivered over a channel
//!
//! [`spawn_fragments`] moves the provider stream into a background task
//! that forwards each content fragment over a bounded channel. The
//! consumer cancels by calling [`FragmentReceiver::close`] or dropping the
//! receiver; the producer notices the closed channel, stops reading and
//! drops the HTTP response.

use dashlm_core::{Error, Result, StreamEvent};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Fragments buffered between producer and consumer
pub const FRAGMENT_CHANNEL_CAPACITY: usize = 64;

/// Receiving end of a streamed reply
#[derive(Debug)]
pub struct FragmentReceiver {
    rx: mpsc::Receiver<Result<String>>,
    producer: JoinHandle<()>,
}

impl FragmentReceiver {
    /// Wait for the next fragment; `None` once the reply is complete
    pub async fn recv(&mut self) -> Option<Result<String>> {
        self.rx.recv().await
    }

    /// Stop the producer
    ///
    /// Fragments already buffered can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Whether the producer task has exited
    pub fn is_finished(&self) -> bool {
        self.producer.is_finished()
    }

    /// Drain the remaining fragments into one string
    pub async fn collect_text(mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(fragment) = self.recv().await {
            text.push_str(&fragment?);
        }
        Ok(text)
    }
}

impl Stream for FragmentReceiver {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Forward the content fragments of `events` from a spawned task
///
/// Must be called inside a tokio runtime.
pub fn spawn_fragments<S>(events: S) -> FragmentReceiver
where
    S: Stream<Item = Result<StreamEvent>> + Send + Unpin + 'static,
{
    let (tx, rx) = mpsc::channel(FRAGMENT_CHANNEL_CAPACITY);
    let producer = tokio::spawn(produce(events, tx));
    FragmentReceiver { rx, producer }
}

async fn produce<S>(mut events: S, tx: mpsc::Sender<Result<String>>)
where
    S: Stream<Item = Result<StreamEvent>> + Unpin,
{
    let mut forwarded = 0usize;
    loop {
        let event = tokio::select! {
            _ = tx.closed() => {
                tracing::debug!(forwarded, "fragment consumer went away; abandoning stream");
                return;
            }
            event = events.next() => event,
        };

        let item = match event {
            Some(Ok(StreamEvent::Done)) => break,
            None => Err(Error::truncated_stream()),
            Some(Ok(StreamEvent::Content(delta))) => Ok(delta.text),
            Some(Ok(StreamEvent::Metadata(_))) => continue,
            Some(Err(e)) => Err(e),
        };
        let failed = item.is_err();

        if tx.send(item).await.is_err() {
            tracing::debug!(forwarded, "fragment consumer went away; abandoning stream");
            return;
        }
        if failed {
            return;
        }
        forwarded += 1;
    }
    tracing::trace!(forwarded, "stream complete");
}
