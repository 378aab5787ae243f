pub mod config;
pub mod error;
pub mod fetcher;
pub mod poller;
pub mod sink;

pub use config::GitHubPollerConfig;
pub use error::{FetchError, PollError, SinkClosed};
pub use fetcher::{EventFetcher, HttpEventFetcher};
pub use poller::{CycleReport, GitHubPoller, poll_cycle};
pub use sink::MessageSink;
