//! Fetch-and-replace synchronization for one collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::api::{Collection, ResourceClient};
use crate::error::AppError;
use crate::presentation::PresentationAdapter;

use super::snapshot::Snapshot;

/// Result of a single refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The view was replaced; carries the number of displayed items.
    Rendered(usize),
    /// A refresh issued later had already rendered; this response was dropped.
    Stale,
    /// The fetch or decode failed; the previous view is untouched.
    Failed(AppError),
}

impl RefreshOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RefreshOutcome::Rendered(_))
    }
}

/// Keeps one collection's rendered view equal to the server's last answer.
///
/// Each refresh takes a ticket when it is issued. A response is rendered only
/// if no later ticket has rendered yet, so overlapping refreshes settle on the
/// most recently issued one regardless of network ordering.
pub struct CollectionSynchronizer {
    collection: Collection,
    client: Arc<dyn ResourceClient>,
    adapter: Arc<dyn PresentationAdapter>,
    issued: AtomicU64,
    rendered: Mutex<u64>,
}

impl CollectionSynchronizer {
    pub fn new(
        collection: Collection,
        client: Arc<dyn ResourceClient>,
        adapter: Arc<dyn PresentationAdapter>,
    ) -> Self {
        Self {
            collection,
            client,
            adapter,
            issued: AtomicU64::new(0),
            rendered: Mutex::new(0),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Fetch the full collection and replace the rendered view.
    ///
    /// Failures are logged and contained; they never reach the operator.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let fetched = match self.client.list(self.collection).await {
            Ok(body) => Snapshot::decode(self.collection, body),
            Err(e) => Err(e),
        };

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Error fetching {}: {e}", self.collection);
                return RefreshOutcome::Failed(e);
            }
        };

        let mut rendered = self.rendered.lock().unwrap();
        if ticket < *rendered {
            debug!(
                "Dropping stale {} response (ticket {ticket}, rendered {})",
                self.collection, *rendered
            );
            return RefreshOutcome::Stale;
        }
        *rendered = ticket;
        self.adapter.render(&snapshot);
        debug!("Rendered {} {} item(s)", snapshot.len(), self.collection);
        RefreshOutcome::Rendered(snapshot.len())
    }
}
