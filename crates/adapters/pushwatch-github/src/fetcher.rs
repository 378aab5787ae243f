use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::config::GitHubPollerConfig;
use crate::error::FetchError;

/// Retrieves the raw activity feed body for one user.
#[async_trait]
pub trait EventFetcher: Send + Sync {
    async fn fetch(&self, user: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches `GET {api_base}/users/{user}/events` over HTTP.
pub struct HttpEventFetcher {
    client: reqwest::Client,
    api_base: String,
    client_id: String,
    client_secret: String,
}

impl HttpEventFetcher {
    pub fn new(config: &GitHubPollerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let (client_id, client_secret) = if config.has_credentials() {
            (config.client_id.clone(), config.client_secret.clone())
        } else {
            (String::new(), String::new())
        };
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            client_id,
            client_secret,
        })
    }

    /// Build the feed URL for `user`, with credentials in the query string.
    pub fn feed_url(&self, user: &str) -> Result<Url, FetchError> {
        let invalid = |reason: String| FetchError::InvalidRequest {
            user: user.to_string(),
            reason,
        };
        if user.is_empty() {
            return Err(invalid("empty user name".to_string()));
        }

        let mut url = Url::parse(&self.api_base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("{} cannot be a base URL", self.api_base)))?
            .pop_if_empty()
            .extend(["users", user, "events"]);
        if !self.client_id.is_empty() {
            url.query_pairs_mut()
                .append_pair("client_id", &self.client_id)
                .append_pair("client_secret", &self.client_secret);
        }
        Ok(url)
    }
}

#[async_trait]
impl EventFetcher for HttpEventFetcher {
    async fn fetch(&self, user: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.feed_url(user)?;
        let shown = redact(&url);

        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: shown.clone(),
                source: source.without_url(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: shown, status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: shown,
                source: source.without_url(),
            })?;
        Ok(body.to_vec())
    }
}

/// Render a URL for logs with the client secret masked.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "client_secret") {
        return url.to_string();
    }
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "client_secret" {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
