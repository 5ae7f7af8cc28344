//! Background service lifecycle management.
//!
//! `BackgroundServices` owns every task spawned at console startup and
//! aborts them together on shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::commands::AppState;
use crate::config;
use crate::core::{CollectionSynchronizer, PollScheduler};

/// Cadences for the background tasks.
#[derive(Debug, Clone, Copy)]
pub struct ServiceTimings {
    pub log_poll_delay: Duration,
    pub request_count_interval: Duration,
}

impl Default for ServiceTimings {
    fn default() -> Self {
        Self {
            log_poll_delay: Duration::from_millis(config::LOG_POLL_DELAY_MS),
            request_count_interval: Duration::from_secs(config::REQUEST_COUNT_INTERVAL_SECS),
        }
    }
}

/// Tasks spawned during console setup.
///
/// 1. One-shot initial loads of blacklist, rules and stats
/// 2. Log poll scheduler (immediate refresh, then pausable cadence)
/// 3. Request counter (fixed interval, not affected by pause)
pub struct BackgroundServices {
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundServices {
    pub fn start(state: &Arc<AppState>) -> Self {
        Self::start_with(state, ServiceTimings::default())
    }

    pub fn start_with(state: &Arc<AppState>, timings: ServiceTimings) -> Self {
        let mut handles = Vec::new();

        // 1. Initial loads run once; only logs are polled afterwards.
        for sync in [&state.blacklist, &state.rules, &state.stats] {
            let sync = Arc::clone(sync);
            handles.push(tokio::spawn(async move {
                sync.refresh().await;
            }));
        }

        // 2. Log poll scheduler.
        handles.push(
            PollScheduler::new(
                Arc::clone(&state.polling),
                vec![Arc::clone(&state.logs)],
                timings.log_poll_delay,
            )
            .spawn(),
        );

        // 3. Request counter.
        handles.push(Self::start_request_counter(
            Arc::clone(&state.requests),
            timings.request_count_interval,
        ));

        tracing::info!("Started {} background task(s)", handles.len());
        Self { handles }
    }

    fn start_request_counter(sync: Arc<CollectionSynchronizer>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                sync.refresh().await;
            }
        })
    }

    pub fn shutdown(self) {
        for handle in &self.handles {
            handle.abort();
        }
        tracing::debug!("Background tasks aborted");
    }
}
