use crate::error::DecodeError;
use crate::events::FeedEvent;

/// Decode a feed response body into its events, preserving feed order.
///
/// Unknown fields are ignored. Anything that is not a JSON array of event
/// objects is a [`DecodeError`] carrying the body for logging.
pub fn decode_events(body: &[u8]) -> Result<Vec<FeedEvent>, DecodeError> {
    serde_json::from_slice(body).map_err(|e| DecodeError {
        reason: e.to_string(),
        payload: String::from_utf8_lossy(body).into_owned(),
    })
}
