//! Dashboard controller: owns the UI state, polls the stats endpoint on a
//! fixed interval and issues on-demand key lookups.
//!
//! Both request streams are sequenced. A stats response is applied only if it
//! is newer than the last applied one and its polling session is still
//! mounted; a search response is applied only if no later search was issued
//! in the meantime. All state changes bump a revision on a `watch` channel so
//! a renderer can redraw.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::{DashboardConfig, DEFAULT_POLL_INTERVAL_MS};
use crate::errors::ClientError;
use crate::models::{BenchmarkStats, SearchResult};
use crate::services::index_client::{HttpIndexClient, IndexService};
use crate::view::DashboardView;

/// Snapshot of everything the dashboard displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub stats: BenchmarkStats,
    pub stats_updated_at: Option<DateTime<Utc>>,
    pub search_input: String,
    pub search_result: Option<SearchResult>,
    pub search_error: Option<String>,
}

/// What happened to a search once its response arrived.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The result replaced the displayed one.
    Applied(SearchResult),
    /// The request failed; the previous result is still displayed.
    Failed(ClientError),
    /// A later search was issued before this one completed; nothing was applied.
    Superseded,
}

impl SearchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Controller state plus the sequencing counters guarding it.
#[derive(Debug, Default)]
struct Tracked {
    view: DashboardState,
    /// Identifies the mounted polling session. Bumped on mount and unmount.
    poll_epoch: u64,
    poll_issued: u64,
    poll_applied: u64,
    search_issued: u64,
}

type SharedState = Arc<Mutex<Tracked>>;

fn lock(state: &Mutex<Tracked>) -> MutexGuard<'_, Tracked> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Inner<S> {
    service: S,
    state: SharedState,
    revision: watch::Sender<u64>,
    poll_interval: Duration,
}

impl<S: IndexService> Inner<S> {
    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Reserve a sequence number for a poll tick, or `None` if the session was unmounted.
    fn begin_poll(&self, epoch: u64) -> Option<u64> {
        let mut tracked = lock(&self.state);
        if tracked.poll_epoch != epoch {
            return None;
        }
        tracked.poll_issued += 1;
        Some(tracked.poll_issued)
    }

    fn finish_poll(&self, epoch: u64, seq: u64, result: Result<BenchmarkStats, ClientError>) {
        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                tracing::debug!(error = %e, seq, "Stats poll failed, keeping previous stats");
                return;
            }
        };

        {
            let mut tracked = lock(&self.state);
            if tracked.poll_epoch != epoch {
                tracing::debug!(seq, "Dropping stats response from unmounted session");
                return;
            }
            if seq <= tracked.poll_applied {
                tracing::debug!(
                    seq,
                    applied = tracked.poll_applied,
                    "Dropping stale stats response"
                );
                return;
            }
            tracked.poll_applied = seq;
            tracked.view.stats = stats;
            tracked.view.stats_updated_at = Some(Utc::now());
        }

        self.notify();
    }
}

/// Drives the dashboard against an [`IndexService`].
pub struct DashboardController<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for DashboardController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl DashboardController<HttpIndexClient> {
    /// Build a controller talking HTTP to the configured service address.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, ClientError> {
        let client = HttpIndexClient::new(config)?;
        Ok(Self::new(client, config.poll_interval))
    }
}

impl<S: IndexService> DashboardController<S> {
    /// A zero `poll_interval` falls back to the 2000 ms default.
    pub fn new(service: S, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            tracing::warn!("Zero poll interval, using default");
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        } else {
            poll_interval
        };
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                service,
                state: Arc::new(Mutex::new(Tracked::default())),
                revision,
                poll_interval,
            }),
        }
    }

    /// Effective polling period.
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> DashboardState {
        lock(&self.inner.state).view.clone()
    }

    /// Current state rendered through the display rules.
    pub fn view(&self) -> DashboardView {
        DashboardView::from_state(&self.snapshot())
    }

    /// Receiver whose value changes every time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Mount: start polling the stats endpoint every `poll_interval`.
    ///
    /// The first request goes out one full interval after mounting. Any
    /// previously mounted session is superseded. Polling runs until the
    /// returned handle is stopped or dropped.
    pub fn start_polling(&self) -> PollingHandle {
        let epoch = {
            let mut tracked = lock(&self.inner.state);
            tracked.poll_epoch += 1;
            tracked.poll_epoch
        };

        let inner = Arc::clone(&self.inner);
        let period = inner.poll_interval;
        tracing::info!(epoch, period_ms = period.as_millis() as u64, "Polling started");

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(seq) = inner.begin_poll(epoch) else {
                    break;
                };

                // Each request runs on its own so a slow response never holds up the schedule.
                let inner = Arc::clone(&inner);
                tokio::spawn(async move {
                    let result = inner.service.fetch_benchmark().await;
                    inner.finish_poll(epoch, seq, result);
                });
            }
        });

        PollingHandle {
            epoch,
            state: Arc::clone(&self.inner.state),
            task,
        }
    }

    /// Replace the search input text.
    pub fn set_search_input(&self, text: impl Into<String>) {
        lock(&self.inner.state).view.search_input = text.into();
        self.inner.notify();
    }

    /// Look up the current search input.
    ///
    /// Never panics on service failure: errors are recorded in
    /// `search_error` and the previous result stays visible. Only the most
    /// recently issued search may change the state.
    pub async fn search(&self) -> SearchOutcome {
        let (seq, key) = {
            let mut tracked = lock(&self.inner.state);
            tracked.search_issued += 1;
            (tracked.search_issued, tracked.view.search_input.clone())
        };

        let result = self.inner.service.search(&key).await;

        let outcome = {
            let mut tracked = lock(&self.inner.state);
            if seq != tracked.search_issued {
                tracing::debug!(
                    seq,
                    latest = tracked.search_issued,
                    "Dropping superseded search response"
                );
                return SearchOutcome::Superseded;
            }

            match result {
                Ok(found) => {
                    tracked.view.search_result = Some(found);
                    tracked.view.search_error = None;
                    SearchOutcome::Applied(found)
                }
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Search failed");
                    tracked.view.search_error = Some(e.to_string());
                    SearchOutcome::Failed(e)
                }
            }
        };

        self.inner.notify();
        outcome
    }

    /// Set the search input to `text` and look it up.
    pub async fn submit(&self, text: impl Into<String>) -> SearchOutcome {
        self.set_search_input(text);
        self.search().await
    }
}

/// Mounted polling session. Stopping or dropping it unmounts: the timer is
/// cancelled and responses still in flight are discarded on arrival.
#[derive(Debug)]
pub struct PollingHandle {
    epoch: u64,
    state: SharedState,
    task: JoinHandle<()>,
}

impl PollingHandle {
    /// True while this session is the mounted one.
    pub fn is_active(&self) -> bool {
        lock(&self.state).poll_epoch == self.epoch && !self.task.is_finished()
    }

    /// Unmount.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        let mounted = {
            let mut tracked = lock(&self.state);
            let mounted = tracked.poll_epoch == self.epoch;
            if mounted {
                tracked.poll_epoch += 1;
            }
            mounted
        };
        self.task.abort();
        if mounted {
            tracing::info!(epoch = self.epoch, "Polling stopped");
        }
    }
}
