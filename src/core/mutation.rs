//! Operator mutations of the blacklist and rule set.
//!
//! Every mutation is two-phase: the server must confirm the change, then the
//! affected collection is re-fetched. The local view is never edited in
//! place. Failures reach the operator as notices and are never retried.

use std::net::IpAddr;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::api::{Collection, ResourceClient};
use crate::error::AppError;
use crate::presentation::{Form, Notice, PresentationAdapter};

use super::sync::{CollectionSynchronizer, RefreshOutcome};

const UNREACHABLE: &str = "the management API could not be reached";

/// A rule ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRule {
    pub pattern: String,
    pub description: String,
}

/// Local pre-check for an IP submission. Returns the canonical address text.
pub fn validate_ip(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("IP address is required".into()));
    }
    trimmed
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| AppError::Validation(format!("'{trimmed}' is not a valid IP address")))
}

/// Local pre-check for a rule submission. Pattern syntax is left to the server.
pub fn validate_rule(pattern: &str, description: &str) -> Result<NewRule, AppError> {
    if pattern.trim().is_empty() {
        return Err(AppError::Validation("Pattern is required".into()));
    }
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".into()));
    }
    Ok(NewRule {
        pattern: pattern.to_string(),
        description: description.trim().to_string(),
    })
}

pub struct MutationController {
    client: Arc<dyn ResourceClient>,
    adapter: Arc<dyn PresentationAdapter>,
    blacklist: Arc<CollectionSynchronizer>,
    rules: Arc<CollectionSynchronizer>,
}

impl MutationController {
    pub fn new(
        client: Arc<dyn ResourceClient>,
        adapter: Arc<dyn PresentationAdapter>,
        blacklist: Arc<CollectionSynchronizer>,
        rules: Arc<CollectionSynchronizer>,
    ) -> Self {
        Self { client, adapter, blacklist, rules }
    }

    /// Add an IP to the blacklist, then re-fetch the blacklist.
    pub async fn add_ip(&self, input: &str) -> Result<RefreshOutcome, AppError> {
        let ip = validate_ip(input).map_err(|e| self.reject(e))?;

        match self.client.create(Collection::Blacklist, json!({ "ip": ip })).await {
            Ok(_) => {
                info!("Blacklisted {ip}");
                self.adapter.clear_form(Form::Blacklist);
                Ok(self.blacklist.refresh().await)
            }
            Err(e) => {
                warn!("Error blacklisting {ip}: {e}");
                self.adapter.notify(&Notice::failure(format!(
                    "Failed to blacklist IP: {}",
                    e.operator_message(UNREACHABLE)
                )));
                Err(e)
            }
        }
    }

    /// Remove an IP from the blacklist, then re-fetch the blacklist.
    pub async fn remove_ip(&self, ip: &str) -> Result<RefreshOutcome, AppError> {
        let trimmed = ip.trim();
        if trimmed.is_empty() {
            return Err(self.reject(AppError::Validation("IP address is required".into())));
        }
        // Same canonical text `add_ip` stored; anything else is sent as typed.
        let canonical = validate_ip(trimmed).ok();
        let ip = canonical.as_deref().unwrap_or(trimmed);

        match self.client.delete(Collection::Blacklist, ip).await {
            Ok(_) => {
                info!("Removed {ip} from blacklist");
                Ok(self.blacklist.refresh().await)
            }
            Err(e) => {
                warn!("Error removing {ip} from blacklist: {e}");
                self.adapter.notify(&Notice::failure("Failed to remove IP"));
                Err(e)
            }
        }
    }

    /// Create a rule, then re-fetch the rule set.
    pub async fn add_rule(
        &self,
        pattern: &str,
        description: &str,
    ) -> Result<RefreshOutcome, AppError> {
        let rule = validate_rule(pattern, description).map_err(|e| self.reject(e))?;
        let payload = json!({ "pattern": rule.pattern, "description": rule.description });

        match self.client.create(Collection::Rules, payload).await {
            Ok(_) => {
                info!("Added rule '{}'", rule.pattern);
                self.adapter.clear_form(Form::Rule);
                Ok(self.rules.refresh().await)
            }
            Err(e) => {
                warn!("Error adding rule '{}': {e}", rule.pattern);
                self.adapter.notify(&Notice::failure(format!(
                    "Failed to add rule: {}",
                    e.operator_message(UNREACHABLE)
                )));
                Err(e)
            }
        }
    }

    /// Delete a rule by id, then re-fetch the rule set.
    pub async fn delete_rule(&self, id: i64) -> Result<RefreshOutcome, AppError> {
        match self.client.delete(Collection::Rules, &id.to_string()).await {
            Ok(_) => {
                info!("Deleted rule {id}");
                Ok(self.rules.refresh().await)
            }
            Err(e) => {
                warn!("Error deleting rule {id}: {e}");
                self.adapter.notify(&Notice::failure("Failed to delete rule"));
                Err(e)
            }
        }
    }

    fn reject(&self, err: AppError) -> AppError {
        self.adapter.notify(&Notice::failure(err.to_string()));
        err
    }
}
