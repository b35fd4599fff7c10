//! Server-streaming responses via bounded channels.
//!
//! Listing operations hand back a lazy store stream. Before it reaches the
//! transport it is moved behind a bounded `tokio::sync::mpsc::channel`, so a
//! slow consumer blocks the producer instead of growing memory, and a dropped
//! consumer stops the producer.
//!
//! A stream ends at the first error: the error is delivered and nothing is
//! produced after it.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use crate::{Result, telemetry};

/// Boxed stream of records, as returned by every listing operation.
pub type RecordStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Default number of records buffered between producer and consumer.
pub const DEFAULT_STREAM_BUFFER: usize = 64;

/// Wrap a stream in a bounded channel for backpressure.
///
/// Spawns a producer task that reads from `inner` and sends items through a
/// bounded `mpsc` channel. When the channel is full the producer waits for the
/// consumer. If the consumer drops the stream the producer stops, including
/// while it is still waiting on `inner`.
///
/// A `buffer_size` of zero is treated as one.
///
/// # Panics
///
/// Requires a tokio runtime context (called within an async fn).
pub fn bounded_stream<T: Send + 'static>(inner: RecordStream<T>, buffer_size: usize) -> RecordStream<T> {
    let (tx, rx) = tokio::sync::mpsc::channel(buffer_size.max(1));

    tokio::spawn(async move {
        let mut inner = inner;
        loop {
            let item = tokio::select! {
                item = inner.next() => item,
                () = tx.closed() => {
                    debug!("stream consumer went away");
                    break;
                }
            };
            let Some(item) = item else { break };
            let failed = item.is_err();
            if tx.send(item).await.is_err() {
                debug!("stream consumer went away");
                break;
            }
            if failed {
                break;
            }
        }
    });

    Box::pin(ReceiverStream::new(rx))
}

/// Count successful records on `rusve_stream_items_total` as they pass.
pub fn counted<T: Send + 'static>(
    inner: RecordStream<T>,
    service: &'static str,
    method: &'static str,
) -> RecordStream<T> {
    Box::pin(inner.inspect(move |item| {
        if item.is_ok() {
            metrics::counter!(telemetry::STREAM_ITEMS_TOTAL,
                "service" => service,
                "method" => method,
            )
            .increment(1);
        }
    }))
}

/// Stream over an already materialised list.
pub fn from_vec<T: Send + 'static>(items: Vec<T>) -> RecordStream<T> {
    Box::pin(futures_util::stream::iter(items.into_iter().map(Ok)))
}
