/// Configuration for the activity feed poller.
#[derive(Debug, Clone)]
pub struct GitHubPollerConfig {
    /// Accounts whose public activity feeds are polled, in polling order.
    pub users: Vec<String>,
    /// OAuth app client id sent as a query parameter.
    pub client_id: String,
    /// OAuth app client secret sent as a query parameter.
    pub client_secret: String,
    /// Polling interval in seconds.
    pub poll_interval_secs: u64,
    /// Scheme and host of the API, without a trailing path.
    pub api_base: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GitHubPollerConfig {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            client_id: String::new(),
            client_secret: String::new(),
            poll_interval_secs: 300,
            api_base: "https://api.github.com".to_string(),
            request_timeout_secs: 30,
            user_agent: "pushwatch/0.1".to_string(),
        }
    }
}

impl GitHubPollerConfig {
    /// Credentials are only sent when both halves are present.
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
