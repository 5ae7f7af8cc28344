//! Shared console state handed to every command.

use std::sync::{Arc, Mutex};

use crate::api::{Collection, ResourceClient};
use crate::core::{CollectionSynchronizer, MutationController, PollingState};
use crate::db::Database;
use crate::presentation::{PresentationAdapter, Theme};

/// Shared console state.
pub struct AppState {
    pub adapter: Arc<dyn PresentationAdapter>,
    pub database: Arc<Database>,
    pub logs: Arc<CollectionSynchronizer>,
    pub blacklist: Arc<CollectionSynchronizer>,
    pub rules: Arc<CollectionSynchronizer>,
    pub stats: Arc<CollectionSynchronizer>,
    /// Secondary live counter of recent proxied requests.
    pub requests: Arc<CollectionSynchronizer>,
    /// Governs the log poll scheduler only.
    pub polling: Arc<PollingState>,
    pub mutations: MutationController,
    pub theme: Mutex<Theme>,
}

impl AppState {
    pub fn new(
        client: Arc<dyn ResourceClient>,
        adapter: Arc<dyn PresentationAdapter>,
        database: Arc<Database>,
    ) -> Self {
        let sync = |collection| {
            Arc::new(CollectionSynchronizer::new(
                collection,
                Arc::clone(&client),
                Arc::clone(&adapter),
            ))
        };
        let logs = sync(Collection::Logs);
        let blacklist = sync(Collection::Blacklist);
        let rules = sync(Collection::Rules);
        let stats = sync(Collection::Stats);
        let requests = sync(Collection::Requests);

        let mutations = MutationController::new(
            Arc::clone(&client),
            Arc::clone(&adapter),
            Arc::clone(&blacklist),
            Arc::clone(&rules),
        );

        Self {
            adapter,
            database,
            logs,
            blacklist,
            rules,
            stats,
            requests,
            polling: Arc::new(PollingState::new()),
            mutations,
            theme: Mutex::new(Theme::default()),
        }
    }

    pub fn synchronizer(&self, collection: Collection) -> &Arc<CollectionSynchronizer> {
        match collection {
            Collection::Logs => &self.logs,
            Collection::Blacklist => &self.blacklist,
            Collection::Rules => &self.rules,
            Collection::Stats => &self.stats,
            Collection::Requests => &self.requests,
        }
    }
}
