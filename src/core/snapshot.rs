//! Typed collection snapshots and the stats → chart transform.
//!
//! A [`Snapshot`] is what the presentation layer receives: the complete
//! current content of one collection, decoded from the API's JSON.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::api::{Collection, LogEntry, Rule, StatsSnapshot};
use crate::error::AppError;

/// One chart dataset: parallel category labels and counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub categories: Vec<String>,
    pub counts: Vec<u64>,
}

impl ChartSeries {
    /// Categories come out in alphabetical order, not the server's key order.
    pub fn from_counts(counts: &BTreeMap<String, u64>) -> Self {
        let (categories, counts) = counts.iter().map(|(k, v)| (k.clone(), *v)).unzip();
        Self { categories, counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Chart-ready form of a [`StatsSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsCharts {
    /// Attack attempts per block reason (bar chart).
    pub attacks: ChartSeries,
    /// Requests per disposition (doughnut chart).
    pub status: ChartSeries,
}

impl From<&StatsSnapshot> for StatsCharts {
    fn from(stats: &StatsSnapshot) -> Self {
        Self {
            attacks: ChartSeries::from_counts(&stats.attacks),
            status: ChartSeries::from_counts(&stats.status),
        }
    }
}

/// Full content of one collection as last delivered by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "collection", content = "items", rename_all = "lowercase")]
pub enum Snapshot {
    Logs(Vec<LogEntry>),
    Blacklist(Vec<String>),
    Rules(Vec<Rule>),
    Stats(StatsCharts),
    Requests(usize),
}

impl Snapshot {
    /// Decode a list response for `collection`. Order is kept as delivered.
    pub fn decode(collection: Collection, body: Value) -> Result<Self, AppError> {
        let snapshot = match collection {
            Collection::Logs => Snapshot::Logs(serde_json::from_value(body)?),
            Collection::Blacklist => Snapshot::Blacklist(serde_json::from_value(body)?),
            Collection::Rules => Snapshot::Rules(serde_json::from_value(body)?),
            Collection::Stats => {
                let stats: StatsSnapshot = serde_json::from_value(body)?;
                Snapshot::Stats(StatsCharts::from(&stats))
            }
            Collection::Requests => match body {
                Value::Array(items) => Snapshot::Requests(items.len()),
                other => {
                    return Err(AppError::Decode(format!(
                        "Expected an array of requests, got {}",
                        json_kind(&other)
                    )))
                }
            },
        };
        Ok(snapshot)
    }

    pub fn collection(&self) -> Collection {
        match self {
            Snapshot::Logs(_) => Collection::Logs,
            Snapshot::Blacklist(_) => Collection::Blacklist,
            Snapshot::Rules(_) => Collection::Rules,
            Snapshot::Stats(_) => Collection::Stats,
            Snapshot::Requests(_) => Collection::Requests,
        }
    }

    /// Number of displayed items (rows, list entries, chart categories or the counter).
    pub fn len(&self) -> usize {
        match self {
            Snapshot::Logs(v) => v.len(),
            Snapshot::Blacklist(v) => v.len(),
            Snapshot::Rules(v) => v.len(),
            Snapshot::Stats(c) => c.attacks.categories.len() + c.status.categories.len(),
            Snapshot::Requests(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
