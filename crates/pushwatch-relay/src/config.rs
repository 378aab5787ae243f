use std::path::{Path, PathBuf};

use serde::Deserialize;

use pushwatch_github::GitHubPollerConfig;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "pushwatch.toml";

/// Top-level configuration, loaded from `pushwatch.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub github: GitHubConfig,
    pub delivery: DeliveryConfig,
}

/// Activity feed section of the config file.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub users: Vec<String>,
    pub client_id: String,
    pub client_secret: String,
    pub poll_interval_secs: u64,
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        let poller = GitHubPollerConfig::default();
        Self {
            users: poller.users,
            client_id: poller.client_id,
            client_secret: poller.client_secret,
            poll_interval_secs: poller.poll_interval_secs,
            api_base: poller.api_base,
            request_timeout_secs: poller.request_timeout_secs,
            user_agent: poller.user_agent,
        }
    }
}

// Hand-written so the secret never reaches the logs.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = if self.client_secret.is_empty() {
            ""
        } else {
            "REDACTED"
        };
        f.debug_struct("GitHubConfig")
            .field("users", &self.users)
            .field("client_id", &self.client_id)
            .field("client_secret", &secret)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Hand-off queue between the poller and the relay output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Summaries buffered before the poller waits on delivery.
    pub queue_capacity: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("couldn't read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl RelayConfig {
    /// Load config from `path`, then apply environment variable overrides.
    ///
    /// A missing or malformed file is an error; there is nothing useful to
    /// poll without a user list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config =
            toml::from_str::<RelayConfig>(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), "Loaded configuration");

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `PUSHWATCH_*` overrides from `var`; empty values are ignored.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| var(key).filter(|v| !v.is_empty());

        if let Some(users) = get("PUSHWATCH_USERS") {
            self.github.users = users
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(id) = get("PUSHWATCH_CLIENT_ID") {
            self.github.client_id = id;
        }
        if let Some(secret) = get("PUSHWATCH_CLIENT_SECRET") {
            self.github.client_secret = secret;
        }
        if let Some(base) = get("PUSHWATCH_API_BASE") {
            self.github.api_base = base;
        }
        if let Some(val) = get("PUSHWATCH_POLL_INTERVAL_SECS") {
            match val.parse::<u64>() {
                Ok(n) => self.github.poll_interval_secs = n,
                Err(_) => tracing::warn!(value = %val, "Ignoring non-numeric PUSHWATCH_POLL_INTERVAL_SECS"),
            }
        }
    }

    /// Reject configurations the poller cannot run with; warn about weak ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gh = &self.github;
        if gh.users.is_empty() {
            return Err(ConfigError::Invalid("github.users must not be empty".into()));
        }
        if gh.users.iter().any(|u| u.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "github.users must not contain blank names".into(),
            ));
        }
        if gh.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "github.poll_interval_secs must be > 0".into(),
            ));
        }
        if gh.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "github.request_timeout_secs must be > 0".into(),
            ));
        }
        if reqwest::Url::parse(&gh.api_base).is_err() {
            return Err(ConfigError::Invalid(format!(
                "github.api_base {:?} is not a valid URL",
                gh.api_base
            )));
        }
        if self.delivery.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "delivery.queue_capacity must be > 0".into(),
            ));
        }

        if gh.client_id.is_empty() || gh.client_secret.is_empty() {
            tracing::warn!("No client credentials configured, polling unauthenticated");
        }
        Ok(())
    }

    pub fn poller_config(&self) -> GitHubPollerConfig {
        let gh = &self.github;
        GitHubPollerConfig {
            users: gh.users.clone(),
            client_id: gh.client_id.clone(),
            client_secret: gh.client_secret.clone(),
            poll_interval_secs: gh.poll_interval_secs,
            api_base: gh.api_base.clone(),
            request_timeout_secs: gh.request_timeout_secs,
            user_agent: gh.user_agent.clone(),
        }
    }
}
