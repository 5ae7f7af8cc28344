//! Management API access.
//!
//! - [`ResourceClient`]: one call per (collection, verb) pair, no retries
//! - [`HttpResourceClient`]: `reqwest` implementation against the live API
//! - [`types`]: wire records returned by the API

mod http;
pub mod types;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

pub use http::HttpResourceClient;
pub use types::{LogEntry, LogStatus, Rule, StatsSnapshot};

/// A server-managed set displayed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Logs,
    Blacklist,
    Rules,
    Stats,
    /// Secondary view: recent proxied requests, consumed only as a count.
    Requests,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Logs,
        Collection::Blacklist,
        Collection::Rules,
        Collection::Stats,
        Collection::Requests,
    ];

    /// API path of the collection resource.
    pub fn path(self) -> &'static str {
        match self {
            Collection::Logs => "/api/logs",
            Collection::Blacklist => "/api/blacklist",
            Collection::Rules => "/api/rules",
            Collection::Stats => "/api/stats",
            Collection::Requests => "/api/requests",
        }
    }

    /// Whether the API accepts create/delete on this collection.
    pub fn is_mutable(self) -> bool {
        matches!(self, Collection::Blacklist | Collection::Rules)
    }

    pub fn name(self) -> &'static str {
        match self {
            Collection::Logs => "logs",
            Collection::Blacklist => "blacklist",
            Collection::Rules => "rules",
            Collection::Stats => "stats",
            Collection::Requests => "requests",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Transport shim over the management API.
///
/// Every method issues exactly one request and returns the decoded JSON body
/// (null for an empty body) or a tagged failure. Implementations must not
/// retry, cache or enforce timeouts.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn list(&self, collection: Collection) -> Result<Value, AppError>;

    async fn create(&self, collection: Collection, payload: Value) -> Result<Value, AppError>;

    async fn delete(&self, collection: Collection, key: &str) -> Result<Value, AppError>;
}

/// Reject create/delete on a read-only collection before any request is made.
pub(crate) fn ensure_mutable(collection: Collection) -> Result<(), AppError> {
    if collection.is_mutable() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "The {collection} collection is read-only"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names_round_trip() {
        for c in Collection::ALL {
            assert_eq!(Collection::from_name(c.name()), Some(c));
        }
        assert_eq!(Collection::from_name("widgets"), None);
    }

    #[test]
    fn test_only_blacklist_and_rules_are_mutable() {
        let mutable: Vec<_> = Collection::ALL.into_iter().filter(|c| c.is_mutable()).collect();
        assert_eq!(mutable, vec![Collection::Blacklist, Collection::Rules]);
        assert_eq!(ensure_mutable(Collection::Stats).unwrap_err().kind(), "Validation");
    }

    #[test]
    fn test_paths_match_management_api() {
        assert_eq!(Collection::Logs.path(), "/api/logs");
        assert_eq!(Collection::Requests.path(), "/api/requests");
    }
}
