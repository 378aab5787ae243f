pub mod decode;
pub mod error;
pub mod events;
pub mod format;

pub use decode::decode_events;
pub use error::{DecodeError, TimestampError};
pub use events::{FeedEvent, PUSH_EVENT};
pub use format::push_summary;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::{Actor, Author, Commit, FeedEvent, PUSH_EVENT, Payload, Repo};

    /// Create a commit with the given message and placeholder metadata.
    pub fn make_commit(message: &str) -> Commit {
        Commit {
            sha: "0000000".to_string(),
            author: Author {
                email: "dev@example.com".to_string(),
                name: "Dev".to_string(),
            },
            message: message.to_string(),
            distinct: true,
            url: String::new(),
        }
    }

    /// Create a push event by `login` to `repo` with one commit per message.
    pub fn make_push_event(
        login: &str,
        repo: &str,
        created_at: &str,
        messages: &[&str],
    ) -> FeedEvent {
        let commits: Vec<Commit> = messages.iter().map(|m| make_commit(m)).collect();
        FeedEvent {
            id: format!("{login}-{created_at}"),
            kind: PUSH_EVENT.to_string(),
            actor: Actor {
                login: login.to_string(),
                url: format!("https://api.github.com/users/{login}"),
                ..Actor::default()
            },
            repo: Repo {
                name: repo.to_string(),
                url: format!("https://api.github.com/repos/{repo}"),
                ..Repo::default()
            },
            payload: Payload {
                size: commits.len() as u32,
                distinct_size: commits.len() as u32,
                git_ref: Some("refs/heads/main".to_string()),
                commits,
                ..Payload::default()
            },
            public: true,
            created_at: created_at.to_string(),
        }
    }

    /// Serialize events into a feed response body.
    pub fn feed_body(events: &[FeedEvent]) -> Vec<u8> {
        serde_json::to_vec(events).unwrap_or_default()
    }
}
