use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::SinkClosed;

/// Delivery boundary for formatted summaries.
///
/// `deliver` may wait until the receiving side has room; the poller does not
/// continue until it returns.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, message: String) -> Result<(), SinkClosed>;
}

/// Bounded channel: waits for capacity, so a stalled reader stalls polling.
#[async_trait]
impl MessageSink for mpsc::Sender<String> {
    async fn deliver(&self, message: String) -> Result<(), SinkClosed> {
        self.send(message).await.map_err(|_| SinkClosed)
    }
}

#[async_trait]
impl MessageSink for mpsc::UnboundedSender<String> {
    async fn deliver(&self, message: String) -> Result<(), SinkClosed> {
        self.send(message).map_err(|_| SinkClosed)
    }
}
