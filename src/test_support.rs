//! In-process fake of the management API for engine tests.

#![cfg(test)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{Collection, LogEntry, LogStatus, ResourceClient, Rule};
use crate::error::AppError;
use crate::presentation::ViewStore;

/// A request the fake received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(Collection),
    Create(Collection, Value),
    Delete(Collection, String),
}

#[derive(Default)]
struct ServerState {
    logs: Vec<LogEntry>,
    blacklist: Vec<String>,
    rules: Vec<Rule>,
    next_rule_id: i64,
    stats: Value,
    requests: usize,
    list_failures: HashMap<Collection, VecDeque<AppError>>,
    list_delays: HashMap<Collection, VecDeque<Duration>>,
    create_failures: VecDeque<AppError>,
    delete_failures: VecDeque<AppError>,
}

/// Stateful fake: mutations change what later `list` calls return, the same
/// way the real firewall does.
pub struct FakeApi {
    state: Mutex<ServerState>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState {
                next_rule_id: 1,
                stats: json!({"attacks": {}, "status": {}}),
                ..ServerState::default()
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn set_blacklist(&self, ips: &[&str]) {
        self.state.lock().unwrap().blacklist = ips.iter().map(|s| s.to_string()).collect();
    }

    pub fn set_rules(&self, rules: Vec<Rule>) {
        let mut state = self.state.lock().unwrap();
        state.next_rule_id = rules.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        state.rules = rules;
    }

    pub fn set_logs(&self, logs: Vec<LogEntry>) {
        self.state.lock().unwrap().logs = logs;
    }

    pub fn set_stats(&self, stats: Value) {
        self.state.lock().unwrap().stats = stats;
    }

    pub fn set_request_count(&self, count: usize) {
        self.state.lock().unwrap().requests = count;
    }

    pub fn fail_next_list(&self, collection: Collection, err: AppError) {
        self.state
            .lock()
            .unwrap()
            .list_failures
            .entry(collection)
            .or_default()
            .push_back(err);
    }

    /// Delay the response of the next `list` call. The body is captured when
    /// the call starts, so a delayed response carries the older state.
    pub fn delay_next_list(&self, collection: Collection, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .list_delays
            .entry(collection)
            .or_default()
            .push_back(delay);
    }

    pub fn fail_next_create(&self, err: AppError) {
        self.state.lock().unwrap().create_failures.push_back(err);
    }

    pub fn fail_next_delete(&self, err: AppError) {
        self.state.lock().unwrap().delete_failures.push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self, collection: Collection) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::List(collection))
            .count()
    }

    pub fn mutation_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, Call::List(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ResourceClient for FakeApi {
    async fn list(&self, collection: Collection) -> Result<Value, AppError> {
        self.record(Call::List(collection));
        let (result, delay) = {
            let mut state = self.state.lock().unwrap();
            let delay = state
                .list_delays
                .get_mut(&collection)
                .and_then(VecDeque::pop_front);
            let failure = state
                .list_failures
                .get_mut(&collection)
                .and_then(VecDeque::pop_front);
            let result = match failure {
                Some(err) => Err(err),
                None => Ok(match collection {
                    Collection::Logs => serde_json::to_value(&state.logs).unwrap(),
                    Collection::Blacklist => json!(state.blacklist),
                    Collection::Rules => serde_json::to_value(&state.rules).unwrap(),
                    Collection::Stats => state.stats.clone(),
                    Collection::Requests => {
                        Value::Array(vec![json!({"path": "/"}); state.requests])
                    }
                }),
            };
            (result, delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn create(&self, collection: Collection, payload: Value) -> Result<Value, AppError> {
        self.record(Call::Create(collection, payload.clone()));
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.create_failures.pop_front() {
            return Err(err);
        }
        match collection {
            Collection::Blacklist => {
                let ip = payload["ip"].as_str().unwrap_or_default().to_string();
                if !state.blacklist.contains(&ip) {
                    state.blacklist.push(ip.clone());
                }
                Ok(json!({"status": format!("IP {ip} blacklisted")}))
            }
            Collection::Rules => {
                let id = state.next_rule_id;
                state.next_rule_id += 1;
                state.rules.push(Rule {
                    id,
                    pattern: payload["pattern"].as_str().unwrap_or_default().to_string(),
                    description: payload["description"].as_str().unwrap_or_default().to_string(),
                });
                Ok(json!({"status": "Rule added"}))
            }
            other => Err(AppError::Server { status: 405, message: Some(format!("{other} is read-only")) }),
        }
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<Value, AppError> {
        self.record(Call::Delete(collection, key.to_string()));
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.delete_failures.pop_front() {
            return Err(err);
        }
        match collection {
            Collection::Blacklist => {
                let before = state.blacklist.len();
                state.blacklist.retain(|ip| ip != key);
                if state.blacklist.len() == before {
                    return Err(AppError::Server { status: 404, message: Some("IP not found".into()) });
                }
                Ok(json!({"status": format!("IP {key} removed from blacklist")}))
            }
            Collection::Rules => {
                let id: i64 = key.parse().map_err(|_| AppError::Server { status: 404, message: None })?;
                state.rules.retain(|r| r.id != id);
                Ok(json!({"status": "Rule deleted"}))
            }
            other => Err(AppError::Server { status: 405, message: Some(format!("{other} is read-only")) }),
        }
    }
}

pub fn rule(id: i64, pattern: &str, description: &str) -> Rule {
    Rule { id, pattern: pattern.to_string(), description: description.to_string() }
}

pub fn log_entry(id: i64, ip: &str, status: &str) -> LogEntry {
    LogEntry {
        id,
        timestamp: format!("2026-10-17T10:00:{:02}", id % 60),
        ip: ip.to_string(),
        method: "GET".to_string(),
        path: "/".to_string(),
        body: None,
        status: LogStatus::Label(status.to_string()),
        reason: None,
    }
}

pub fn views() -> Arc<ViewStore> {
    Arc::new(ViewStore::new())
}
