use std::time::Duration;

use chrono::{DateTime, Utc};

use pushwatch_core::{FeedEvent, TimestampError, decode_events, push_summary};

use crate::config::GitHubPollerConfig;
use crate::error::{PollError, SinkClosed};
use crate::fetcher::{EventFetcher, HttpEventFetcher};
use crate::sink::MessageSink;

/// Activity feed poller: runs one cycle per interval, forever.
pub struct GitHubPoller<F = HttpEventFetcher> {
    config: GitHubPollerConfig,
    fetcher: F,
}

/// Outcome of a single pass over every configured user.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Baseline for the next cycle: when this cycle's fetch loop finished.
    pub watermark: DateTime<Utc>,
    pub emitted: usize,
    /// Events dropped for a bad timestamp or an empty commit list.
    pub skipped: usize,
    pub failed_users: Vec<String>,
    /// Delivery went away mid-cycle; remaining work was abandoned.
    pub sink_closed: bool,
}

/// What to do with one decoded event.
#[derive(Debug, PartialEq)]
enum Disposition {
    NotPush,
    Stale,
    NoCommits,
    Emit(String),
}

impl GitHubPoller<HttpEventFetcher> {
    pub fn new(config: GitHubPollerConfig) -> Result<Self, reqwest::Error> {
        let fetcher = HttpEventFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: EventFetcher> GitHubPoller<F> {
    pub fn with_fetcher(config: GitHubPollerConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Run the poller loop starting from the current time.
    ///
    /// Only returns once the sink has closed.
    pub async fn run<S: MessageSink>(self, sink: S) {
        self.run_since(Utc::now(), sink).await;
    }

    /// Run the poller loop with an explicit initial watermark.
    pub async fn run_since<S: MessageSink>(self, mut watermark: DateTime<Utc>, sink: S) {
        let interval = Duration::from_secs(self.config.poll_interval_secs);
        tracing::info!(
            users = self.config.users.len(),
            interval_secs = self.config.poll_interval_secs,
            "Poller started"
        );

        loop {
            let report = poll_cycle(&self.fetcher, &self.config.users, watermark, &sink).await;
            tracing::debug!(
                emitted = report.emitted,
                skipped = report.skipped,
                failed = report.failed_users.len(),
                "Poll cycle complete"
            );
            watermark = report.watermark;

            if report.sink_closed {
                tracing::info!("Message sink closed, stopping poller");
                return;
            }

            tokio::time::sleep(interval).await;
        }
    }
}

/// Poll every user once and deliver summaries of pushes newer than `since`.
///
/// A failure for one user is logged and skips only that user. `since` is
/// fixed for the whole cycle.
pub async fn poll_cycle<F, S>(
    fetcher: &F,
    users: &[String],
    since: DateTime<Utc>,
    sink: &S,
) -> CycleReport
where
    F: EventFetcher + ?Sized,
    S: MessageSink + ?Sized,
{
    let mut report = CycleReport {
        watermark: since,
        emitted: 0,
        skipped: 0,
        failed_users: Vec::new(),
        sink_closed: false,
    };

    for user in users {
        let events = match poll_user(fetcher, user).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "Failed to poll user feed");
                if let PollError::Decode(ref d) = e {
                    tracing::debug!(user = %user, payload = %d.payload, "Undecodable feed body");
                }
                report.failed_users.push(user.clone());
                continue;
            },
        };

        for event in &events {
            let summary = match classify(event, since) {
                Ok(Disposition::Emit(summary)) => summary,
                Ok(Disposition::NotPush | Disposition::Stale) => continue,
                Ok(Disposition::NoCommits) => {
                    tracing::debug!(
                        user = %user,
                        event_id = %event.id,
                        "Push without commits, ignoring"
                    );
                    report.skipped += 1;
                    continue;
                },
                Err(e) => {
                    tracing::warn!(
                        user = %user,
                        event_id = %event.id,
                        error = %e,
                        "Couldn't parse event time, ignoring event"
                    );
                    report.skipped += 1;
                    continue;
                },
            };

            tracing::info!(user = %user, event_id = %event.id, "{summary}");
            if let Err(SinkClosed) = sink.deliver(format!("{summary}\n")).await {
                report.sink_closed = true;
                report.watermark = Utc::now();
                return report;
            }
            report.emitted += 1;
        }
    }

    report.watermark = Utc::now();
    report
}

async fn poll_user<F>(fetcher: &F, user: &str) -> Result<Vec<FeedEvent>, PollError>
where
    F: EventFetcher + ?Sized,
{
    let body = fetcher.fetch(user).await?;
    Ok(decode_events(&body)?)
}

fn classify(event: &FeedEvent, since: DateTime<Utc>) -> Result<Disposition, TimestampError> {
    if !event.is_push() {
        return Ok(Disposition::NotPush);
    }
    if event.created_at()? <= since {
        return Ok(Disposition::Stale);
    }
    Ok(match push_summary(event) {
        Some(summary) => Disposition::Emit(summary),
        None => Disposition::NoCommits,
    })
}
