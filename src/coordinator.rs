//! Update coordinator: polling cadence, single-flight refresh, snapshot
//! cache and subscriber notification.
//!
//! ## Architecture: immutable snapshot swap
//!
//! The coordinator owns the only mutable state in the service. Each
//! successful cycle builds a complete new [`AreaTable`] and publishes it
//! as an `Arc` through a `watch` channel; subscribers read the latest
//! snapshot lock-free via `borrow()` and can never observe a partially
//! merged table. A failed cycle publishes nothing, so the last known-good
//! snapshot keeps serving until the next success.
//!
//! ## Cycle shape
//!
//! 1. First successful cycle of a session fetches the areas resource and
//!    caches the base index (area membership is stable between cycles).
//! 2. Every cycle fetches the active warnings and merges them onto the
//!    base index.
//! 3. Both fetches plus the merge run under one timeout; exceeding it
//!    abandons the cycle and counts as a failure.
//!
//! Cycles never overlap: a `refresh()` that arrives while another is in
//! flight waits for it and shares its outcome instead of issuing a second
//! network round trip.

use crate::areas::{self, AreaIndex, MergeOutcome};
use crate::ingest::FloodSource;
use crate::model::{AreaTable, UpdateError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Coordinator configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// How often to run a refresh cycle (default: 15 minutes, matching the
    /// upstream feed's update frequency).
    pub poll_interval: Duration,

    /// Budget for one whole cycle: both resource fetches plus the merge
    /// (default: 10 seconds).
    pub cycle_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15 * 60),
            cycle_timeout: Duration::from_secs(10),
        }
    }
}

// ---------------------------------------------------------------------------
// Health reporting
// ---------------------------------------------------------------------------

/// Coordinator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// No cycle has completed yet.
    Uninitialized,
    /// The most recent cycle succeeded; the snapshot is current.
    Ready,
    /// A cycle failed after the coordinator was ready; the last known-good
    /// snapshot is still being served.
    Degraded,
    /// The first cycle never succeeded. Terminal until the owner retries
    /// `first_refresh`.
    Failed,
}

/// Observability view of the coordinator. Updated under the cycle lock
/// and returned by value so readers never hold it.
#[derive(Debug, Clone)]
pub struct CoordinatorHealth {
    pub readiness: Readiness,
    pub consecutive_failures: u32,
    /// Display form of the most recent cycle error, if the last cycle failed.
    pub last_error: Option<String>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    /// Warning items dropped by the most recent successful merge because
    /// they referenced an unknown area.
    pub skipped_warnings: usize,
}

impl CoordinatorHealth {
    fn new() -> Self {
        Self {
            readiness: Readiness::Uninitialized,
            consecutive_failures: 0,
            last_error: None,
            last_attempt: None,
            last_success: None,
            skipped_warnings: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// The snapshot type handed to subscribers: the full merged table behind
/// an `Arc`, replaced wholesale on each successful cycle.
pub type Snapshot = Arc<AreaTable>;

/// Per-session mutable state, guarded by the cycle lock.
struct CycleState {
    /// Base area index, fetched on the first successful cycle of the
    /// session and reused until `reset_session`.
    base: Option<Arc<AreaIndex>>,
    health: CoordinatorHealth,
}

/// Polling coordinator over a [`FloodSource`].
///
/// All methods take `&self`; the coordinator can be shared behind an
/// `Arc` between the polling task and on-demand refresh callers.
pub struct UpdateCoordinator<S> {
    source: S,
    config: PollConfig,
    state: Mutex<CycleState>,
    /// Count of finished cycles (success or failure). Lets a waiter detect
    /// that the cycle it queued behind has already run on its behalf.
    completed_cycles: AtomicU64,
    publisher: watch::Sender<Snapshot>,
}

impl<S: FloodSource> UpdateCoordinator<S> {
    pub fn new(source: S, config: PollConfig) -> Self {
        let (publisher, _) = watch::channel(Arc::new(AreaTable::new()));
        Self {
            source,
            config,
            state: Mutex::new(CycleState { base: None, health: CoordinatorHealth::new() }),
            completed_cycles: AtomicU64::new(0),
            publisher,
        }
    }

    /// Performs one full cycle before declaring readiness.
    ///
    /// On failure nothing is published and `UpdateError::NotReady` is
    /// returned so the owner can defer registration; calling again retries
    /// setup. Once the coordinator is ready this is a no-op.
    pub async fn first_refresh(&self) -> Result<(), UpdateError> {
        let mut state = self.state.lock().await;
        if matches!(state.health.readiness, Readiness::Ready | Readiness::Degraded) {
            return Ok(());
        }
        match self.run_cycle(&mut state).await {
            Ok(()) => Ok(()),
            Err(e) => Err(UpdateError::NotReady(Box::new(e))),
        }
    }

    /// Performs exactly one refresh cycle, or coalesces into one that is
    /// already in flight.
    ///
    /// A caller that arrives while another cycle is running waits for that
    /// cycle and returns `Ok(())` without fetching; its outcome is visible
    /// through [`health`](Self::health). A failed cycle leaves the previous
    /// snapshot untouched.
    pub async fn refresh(&self) -> Result<(), UpdateError> {
        let seen = self.completed_cycles.load(Ordering::Acquire);
        let mut state = self.state.lock().await;
        if self.completed_cycles.load(Ordering::Acquire) != seen {
            debug!("refresh coalesced into the cycle that just completed");
            return Ok(());
        }
        self.run_cycle(&mut state).await
    }

    /// Drops the cached base index so the next cycle rebuilds area
    /// membership from the areas resource.
    pub async fn reset_session(&self) {
        self.state.lock().await.base = None;
    }

    /// Latest published snapshot. Before the first successful cycle this
    /// is an empty table.
    pub fn data(&self) -> Snapshot {
        self.publisher.borrow().clone()
    }

    /// Registers a subscriber. Each successful cycle delivers exactly one
    /// change notification carrying the new snapshot; reads through the
    /// receiver are lock-free.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// Current health, by value.
    pub async fn health(&self) -> CoordinatorHealth {
        self.state.lock().await.health.clone()
    }

    /// Runs the polling loop: one readiness cycle, then a refresh on every
    /// interval tick until the owning task is cancelled.
    pub async fn run(&self) -> Result<(), UpdateError> {
        self.first_refresh().await?;
        info!(
            "starting polling loop, interval {}s, cycle timeout {}s",
            self.config.poll_interval.as_secs(),
            self.config.cycle_timeout.as_secs()
        );

        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; first_refresh covered it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = self.refresh().await {
                warn!("scheduled refresh failed, serving cached data: {}", e);
            }
        }
    }

    /// One cycle under the state lock: fetch, merge, publish, book-keep.
    async fn run_cycle(&self, state: &mut CycleState) -> Result<(), UpdateError> {
        state.health.last_attempt = Some(Utc::now());

        let result = match timeout(
            self.config.cycle_timeout,
            self.fetch_and_merge(state.base.clone()),
        )
        .await
        {
            Err(_elapsed) => Err(UpdateError::Timeout(self.config.cycle_timeout)),
            Ok(Err(e)) => Err(e),
            Ok(Ok((base, outcome))) => {
                let MergeOutcome { table, skipped } = outcome;
                state.base = Some(base);
                state.health.skipped_warnings = skipped;
                if skipped > 0 {
                    warn!("{} warning item(s) referenced unknown areas and were skipped", skipped);
                }
                self.publisher.send_replace(Arc::new(table));
                Ok(())
            }
        };

        self.completed_cycles.fetch_add(1, Ordering::Release);

        match &result {
            Ok(()) => {
                state.health.readiness = Readiness::Ready;
                state.health.consecutive_failures = 0;
                state.health.last_error = None;
                state.health.last_success = Some(Utc::now());
                debug!("update cycle succeeded, {} areas published", self.publisher.borrow().len());
            }
            Err(e) => {
                state.health.consecutive_failures += 1;
                state.health.last_error = Some(e.to_string());
                state.health.readiness = match state.health.readiness {
                    Readiness::Ready | Readiness::Degraded => Readiness::Degraded,
                    Readiness::Uninitialized | Readiness::Failed => Readiness::Failed,
                };
                warn!(
                    "update cycle failed ({} consecutive): {}",
                    state.health.consecutive_failures, e
                );
            }
        }

        result
    }

    /// The timed portion of a cycle. Takes the cached base by value and
    /// returns the base actually used, so nothing is committed to the
    /// session state if the timeout abandons this future mid-flight.
    async fn fetch_and_merge(
        &self,
        base: Option<Arc<AreaIndex>>,
    ) -> Result<(Arc<AreaIndex>, MergeOutcome), UpdateError> {
        let base = match base {
            Some(existing) => existing,
            None => {
                let items = self.source.fetch_areas().await?;
                info!("loaded {} flood areas for the session", items.len());
                Arc::new(areas::build_area_index(items))
            }
        };

        let warning_items = self.source.fetch_warnings().await?;
        let outcome = areas::apply_warnings(&base, warning_items);
        Ok((base, outcome))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ea::{AreaItem, WarningItem};
    use crate::model::FetchError;
    use async_trait::async_trait;

    /// Source that always answers with one area and no warnings.
    struct QuietSource;

    #[async_trait]
    impl FloodSource for QuietSource {
        async fn fetch_areas(&self) -> Result<Vec<AreaItem>, FetchError> {
            Ok(vec![AreaItem {
                notation: "012FWFAL".to_string(),
                label: "River Foo at Falton".to_string(),
                description: "desc".to_string(),
            }])
        }

        async fn fetch_warnings(&self) -> Result<Vec<WarningItem>, FetchError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_poll_config() {
        let config = PollConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(15 * 60));
        assert_eq!(config.cycle_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_coordinator_starts_uninitialized_and_empty() {
        let coordinator = UpdateCoordinator::new(QuietSource, PollConfig::default());

        assert!(coordinator.data().is_empty(), "no snapshot before the first cycle");
        let health = coordinator.health().await;
        assert_eq!(health.readiness, Readiness::Uninitialized);
        assert_eq!(health.consecutive_failures, 0);
        assert!(health.last_attempt.is_none());
    }

    #[tokio::test]
    async fn test_first_refresh_publishes_baseline_table() {
        let coordinator = UpdateCoordinator::new(QuietSource, PollConfig::default());

        coordinator.first_refresh().await.expect("quiet source should refresh cleanly");

        let snapshot = coordinator.data();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["012FWFAL"].risk_level, 0);
        assert_eq!(coordinator.health().await.readiness, Readiness::Ready);
    }

    #[tokio::test]
    async fn test_first_refresh_is_idempotent_once_ready() {
        let coordinator = UpdateCoordinator::new(QuietSource, PollConfig::default());

        coordinator.first_refresh().await.expect("first call");
        let first_success = coordinator.health().await.last_success;

        coordinator.first_refresh().await.expect("second call is a no-op");
        assert_eq!(
            coordinator.health().await.last_success, first_success,
            "a ready coordinator must not run another cycle from first_refresh"
        );
    }
}
