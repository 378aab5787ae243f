use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Drain summaries from the poller and write them to the relay output.
///
/// Messages arrive newline-terminated and are flushed one at a time so the
/// chat side sees each as soon as it is produced. Returns the number of
/// messages written once the poller drops its sender.
pub async fn deliver_lines<W>(mut rx: mpsc::Receiver<String>, mut out: W) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut delivered = 0;
    while let Some(message) = rx.recv().await {
        out.write_all(message.as_bytes()).await?;
        out.flush().await?;
        delivered += 1;
    }
    Ok(delivered)
}
