/// The feed body could not be parsed as a list of events.
#[derive(Debug, thiserror::Error)]
#[error("malformed event feed: {reason}")]
pub struct DecodeError {
    pub reason: String,
    /// The offending body (lossy UTF-8), kept for diagnostics.
    pub payload: String,
}

/// An event's `created_at` is not a valid RFC 3339 timestamp.
#[derive(Debug, thiserror::Error)]
#[error("invalid event timestamp {value:?}: {reason}")]
pub struct TimestampError {
    pub value: String,
    pub reason: String,
}
