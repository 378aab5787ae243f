use pushwatch_core::DecodeError;

/// Failure to retrieve one user's feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request URL could not be built.
    #[error("invalid request for user {user:?}: {reason}")]
    InvalidRequest { user: String, reason: String },

    /// Connection, timeout, or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Why one user's contribution to a cycle was dropped.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// The delivery side of the sink has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("message sink closed")]
pub struct SinkClosed;
