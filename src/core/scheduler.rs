//! Self-rescheduling poll loop with operator pause/resume.
//!
//! One task drives the chain for the scheduler's whole lifetime: refresh,
//! wait the configured delay, re-check [`PollingState`], repeat. Because the
//! delay starts only after the refresh completes, a slow API stretches the
//! cadence instead of piling up overlapping polls. A pause never aborts a
//! refresh already in flight; it only stops new ones from being scheduled.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::sync::{CollectionSynchronizer, RefreshOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PollStatus {
    enabled: bool,
    /// Incremented on every PAUSED → RUNNING transition.
    resumes: u64,
}

/// Operator-controlled polling flag. Enabled at load.
pub struct PollingState {
    tx: watch::Sender<PollStatus>,
}

impl PollingState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PollStatus { enabled: true, resumes: 0 });
        Self { tx }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.borrow().enabled
    }

    pub fn phase(&self) -> PollPhase {
        if self.is_enabled() {
            PollPhase::Running
        } else {
            PollPhase::Paused
        }
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        let mut enabled = false;
        self.tx.send_modify(|status| {
            status.enabled = !status.enabled;
            if status.enabled {
                status.resumes += 1;
            }
            enabled = status.enabled;
        });
        info!("Log polling {}", if enabled { "resumed" } else { "paused" });
        enabled
    }

    fn subscribe(&self) -> watch::Receiver<PollStatus> {
        self.tx.subscribe()
    }
}

impl Default for PollingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodically refreshes its target collections while polling is enabled.
pub struct PollScheduler {
    state: Arc<PollingState>,
    targets: Vec<Arc<CollectionSynchronizer>>,
    delay: Duration,
}

impl PollScheduler {
    pub fn new(
        state: Arc<PollingState>,
        targets: Vec<Arc<CollectionSynchronizer>>,
        delay: Duration,
    ) -> Self {
        Self { state, targets, delay }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Drive the poll chain until the [`PollingState`] is dropped.
    pub async fn run(self) {
        let Self { state, targets, delay } = self;
        let mut rx = state.subscribe();
        drop(state);

        'chain: loop {
            let Some(epoch) = wait_until_running(&mut rx).await else {
                break;
            };
            tick(&targets).await;

            let pause = tokio::time::sleep(delay);
            tokio::pin!(pause);
            loop {
                tokio::select! {
                    () = &mut pause => continue 'chain,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break 'chain;
                        }
                        let status = *rx.borrow_and_update();
                        if status.enabled && status.resumes != epoch {
                            debug!("Resumed during delay, refreshing immediately");
                            continue 'chain;
                        }
                    }
                }
            }
        }
        debug!("Poll scheduler stopped");
    }
}

async fn tick(targets: &[Arc<CollectionSynchronizer>]) {
    let outcomes = join_all(targets.iter().map(|sync| sync.refresh())).await;
    for (sync, outcome) in targets.iter().zip(outcomes) {
        if let RefreshOutcome::Rendered(n) = outcome {
            debug!("Polled {}: {n} item(s)", sync.collection());
        }
    }
}

/// Block while paused. Returns the resume epoch, or `None` once the state is gone.
async fn wait_until_running(rx: &mut watch::Receiver<PollStatus>) -> Option<u64> {
    loop {
        let status = *rx.borrow_and_update();
        if status.enabled {
            return Some(status.resumes);
        }
        rx.changed().await.ok()?;
    }
}
