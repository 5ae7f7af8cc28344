//! Core engine: collection sync, polling, mutations.
//!
//! - [`CollectionSynchronizer`]: fetch-and-replace of one collection's view
//! - [`PollScheduler`] / [`PollingState`]: self-rescheduling pausable poll loop
//! - [`MutationController`]: confirmed create/delete followed by a re-fetch
//! - [`Snapshot`] / [`StatsCharts`]: decoded collection content and chart series

pub mod mutation;
pub mod scheduler;
pub mod snapshot;
pub mod sync;

pub use mutation::{validate_ip, validate_rule, MutationController, NewRule};
pub use scheduler::{PollPhase, PollScheduler, PollingState};
pub use snapshot::{ChartSeries, Snapshot, StatsCharts};
pub use sync::{CollectionSynchronizer, RefreshOutcome};
