//! Records returned by the management API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One filtered request as logged by the firewall. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub ip: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
    pub status: LogStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Outcome recorded for a logged request.
///
/// The firewall stores a disposition label (`blocked` / `allowed`); an HTTP
/// style code is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogStatus {
    Code(i64),
    Label(String),
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStatus::Code(code) => write!(f, "{code}"),
            LogStatus::Label(label) => f.write_str(label),
        }
    }
}

/// A custom pattern-matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub pattern: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Aggregate counters as computed by the firewall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub attacks: BTreeMap<String, u64>,
    #[serde(default)]
    pub status: BTreeMap<String, u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_entry_accepts_label_status_and_nulls() {
        let entry: LogEntry = serde_json::from_value(json!({
            "id": 7,
            "timestamp": "2026-10-17T09:12:44",
            "ip": "203.0.113.9",
            "method": "GET",
            "path": "/etc/passwd",
            "body": null,
            "status": "blocked",
            "reason": "malicious: path_traversal"
        }))
        .unwrap();
        assert_eq!(entry.status, LogStatus::Label("blocked".into()));
        assert_eq!(entry.body, None);
        assert_eq!(entry.reason.as_deref(), Some("malicious: path_traversal"));
    }

    #[test]
    fn test_log_entry_accepts_numeric_status() {
        let entry: LogEntry = serde_json::from_value(json!({
            "id": 8,
            "timestamp": "t",
            "ip": "10.0.0.1",
            "method": "POST",
            "path": "/login",
            "status": 403
        }))
        .unwrap();
        assert_eq!(entry.status.to_string(), "403");
        assert_eq!(entry.reason, None);
    }

    #[test]
    fn test_rule_null_description_is_empty() {
        let rule: Rule =
            serde_json::from_value(json!({"id": 1, "pattern": "wget", "description": null}))
                .unwrap();
        assert_eq!(rule.description, "");
    }

    #[test]
    fn test_stats_missing_sections_default_empty() {
        let stats: StatsSnapshot =
            serde_json::from_value(json!({"attacks": {"rate limit exceeded": 3}})).unwrap();
        assert_eq!(stats.attacks["rate limit exceeded"], 3);
        assert!(stats.status.is_empty());
    }
}
