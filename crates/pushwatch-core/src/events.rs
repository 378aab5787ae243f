use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TimestampError;

/// Type tag the feed uses for commits pushed to a ref.
pub const PUSH_EVENT: &str = "PushEvent";

/// One record from a user's public activity feed.
///
/// Only the fields the poller reads are modelled; anything else the feed
/// returns is ignored during decoding. Every field defaults when absent or
/// `null` so that non-push records sharing the same array still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub actor: Actor,
    #[serde(deserialize_with = "null_as_default")]
    pub repo: Repo,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: Payload,
    #[serde(deserialize_with = "null_as_default")]
    pub public: bool,
    /// RFC 3339 creation time, kept raw so a bad value only drops this event.
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl FeedEvent {
    pub fn is_push(&self) -> bool {
        self.kind == PUSH_EVENT
    }

    /// Parse `created_at` as an RFC 3339 timestamp, normalized to UTC.
    pub fn created_at(&self) -> Result<DateTime<Utc>, TimestampError> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| TimestampError {
                value: self.created_at.clone(),
                reason: e.to_string(),
            })
    }

    pub fn commits(&self) -> &[Commit] {
        &self.payload.commits
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub login: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gravatar_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// "owner/name"
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Push payload. Other event types carry different payloads; those decode
/// to the defaults here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    #[serde(deserialize_with = "null_as_default")]
    pub push_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub size: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub distinct_size: u32,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub head: Option<String>,
    pub before: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(deserialize_with = "null_as_default")]
    pub sha: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: Author,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub distinct: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Commit {
    /// The subject line of the commit message.
    pub fn subject(&self) -> &str {
        self.message.split(['\n', '\r']).next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// The feed sends `null` for absent values; treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_parses_rfc3339() {
        let event = FeedEvent {
            created_at: "2023-01-01T00:05:00Z".to_string(),
            ..FeedEvent::default()
        };
        let t = event.created_at().unwrap();
        assert_eq!(t.to_rfc3339(), "2023-01-01T00:05:00+00:00");
    }

    #[test]
    fn created_at_normalizes_offset_to_utc() {
        let event = FeedEvent {
            created_at: "2023-01-01T02:05:00+02:00".to_string(),
            ..FeedEvent::default()
        };
        let t = event.created_at().unwrap();
        assert_eq!(t.to_rfc3339(), "2023-01-01T00:05:00+00:00");
    }

    #[test]
    fn created_at_rejects_garbage() {
        let event = FeedEvent {
            created_at: "yesterday".to_string(),
            ..FeedEvent::default()
        };
        let err = event.created_at().unwrap_err();
        assert_eq!(err.value, "yesterday");
    }

    #[test]
    fn commit_subject_is_first_line() {
        let commit = Commit {
            message: "Fix bug\n\nDetails".to_string(),
            ..Commit::default()
        };
        assert_eq!(commit.subject(), "Fix bug");
    }

    #[test]
    fn commit_subject_handles_crlf() {
        let commit = Commit {
            message: "Fix bug\r\nDetails".to_string(),
            ..Commit::default()
        };
        assert_eq!(commit.subject(), "Fix bug");
    }

    #[test]
    fn commit_subject_stops_at_lone_carriage_return() {
        let commit = Commit {
            message: "a\rb".to_string(),
            ..Commit::default()
        };
        assert_eq!(commit.subject(), "a");
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let json = r#"{
            "id": "1",
            "type": "PushEvent",
            "actor": {"id": null, "login": "alice", "gravatar_id": null, "url": null},
            "repo": null,
            "payload": {"size": null, "ref": null, "commits": [
                {"sha": "abc", "author": null, "message": null, "distinct": null}
            ]},
            "public": null,
            "created_at": "2023-01-01T00:05:00Z"
        }"#;
        let event: FeedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.actor.login, "alice");
        assert_eq!(event.actor.gravatar_id, "");
        assert_eq!(event.repo, Repo::default());
        assert!(!event.public);
        assert_eq!(event.commits().len(), 1);
        assert_eq!(event.commits()[0].message, "");
        assert_eq!(event.commits()[0].author, Author::default());
    }

    #[test]
    fn empty_message_has_empty_subject() {
        assert_eq!(Commit::default().subject(), "");
    }

    #[test]
    fn push_type_detection() {
        let mut event = FeedEvent {
            kind: PUSH_EVENT.to_string(),
            ..FeedEvent::default()
        };
        assert!(event.is_push());
        event.kind = "WatchEvent".to_string();
        assert!(!event.is_push());
    }
}
