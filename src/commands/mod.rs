//! Operator command handlers, organized by functional domain.
//!
//! - `blacklist`: add/remove IP
//! - `rules`: add/delete pattern rule
//! - `system`: polling toggle, theme toggle, manual refresh
//! - `logic`: pure intent parsing (unit-testable)
//! - `state`: shared `AppState` definition
//!
//! [`dispatch`] is the single table mapping an [`Intent`] to its handler.

pub(crate) mod blacklist;
mod logic;
pub(crate) mod rules;
mod state;
pub(crate) mod system;

use tracing::debug;

use crate::error::AppError;
use crate::presentation::Notice;

pub use logic::{parse_intent, Intent, HELP};
pub use state::AppState;
pub use system::restore_theme;

/// Whether the console loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Route an operator intent to its handler.
pub async fn dispatch(state: &AppState, intent: Intent) -> Result<Flow, AppError> {
    debug!("Dispatching {intent:?}");
    match intent {
        Intent::AddIp { ip } => blacklist::add_ip(state, &ip).await?,
        Intent::RemoveIp { ip } => blacklist::remove_ip(state, &ip).await?,
        Intent::AddRule { pattern, description } => {
            rules::add_rule(state, &pattern, &description).await?
        }
        Intent::DeleteRule { id } => rules::delete_rule(state, id).await?,
        Intent::ToggleTheme => {
            system::toggle_theme(state)?;
        }
        Intent::TogglePolling => {
            system::toggle_polling(state);
        }
        Intent::Refresh { collection } => {
            system::refresh(state, collection).await;
        }
        Intent::Help => state.adapter.notify(&Notice::info(HELP)),
        Intent::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::Collection;
    use crate::core::{PollPhase, Snapshot};
    use crate::db::Database;
    use crate::presentation::{Theme, ViewStore};
    use crate::test_support::{rule, views, Call, FakeApi};

    fn state() -> (Arc<FakeApi>, Arc<ViewStore>, AppState) {
        let api = FakeApi::shared();
        let store = views();
        let db = Arc::new(Database::open_in_memory().unwrap());
        let state = AppState::new(api.clone(), store.clone(), db);
        (api, store, state)
    }

    async fn run(state: &AppState, line: &str) -> Result<Flow, AppError> {
        let intent = parse_intent(line)?.expect("non-blank line");
        dispatch(state, intent).await
    }

    #[tokio::test]
    async fn test_dispatch_add_ip_updates_blacklist_view() {
        let (api, store, state) = state();

        assert_eq!(run(&state, "add-ip 10.0.0.5").await.unwrap(), Flow::Continue);

        assert_eq!(store.blacklist().unwrap(), vec!["10.0.0.5"]);
        assert_eq!(api.list_calls(Collection::Logs), 0);
    }

    #[tokio::test]
    async fn test_dispatch_empty_add_ip_is_rejected_locally() {
        let (api, store, state) = state();

        let err = run(&state, "add-ip").await.unwrap_err();

        assert_eq!(err.kind(), "Validation");
        assert!(api.calls().is_empty());
        assert_eq!(store.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_rule_lifecycle() {
        let (api, store, state) = state();
        api.set_rules(vec![rule(1, "nikto", "scanner")]);

        run(&state, "add-rule sqlmap -- scanner").await.unwrap();
        assert_eq!(store.rule_ids(), Some(vec![1, 2]));

        run(&state, "delete-rule 1").await.unwrap();
        assert_eq!(store.rule_ids(), Some(vec![2]));
        assert!(api.calls().contains(&Call::Delete(Collection::Rules, "1".into())));
    }

    #[tokio::test]
    async fn test_dispatch_toggle_polling_updates_indicator() {
        let (_api, store, state) = state();

        run(&state, "pause").await.unwrap();
        assert_eq!(state.polling.phase(), PollPhase::Paused);
        assert!(!store.polling_shown());

        run(&state, "pause").await.unwrap();
        assert_eq!(state.polling.phase(), PollPhase::Running);
        assert!(store.polling_shown());
    }

    #[tokio::test]
    async fn test_dispatch_toggle_theme_persists() {
        let (_api, store, state) = state();
        assert_eq!(restore_theme(&state).unwrap(), Theme::Light);

        run(&state, "theme").await.unwrap();

        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(state.database.load_theme().unwrap(), Theme::Dark);

        run(&state, "theme").await.unwrap();
        assert_eq!(state.database.load_theme().unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_toggle_theme_save_failure_notifies_but_applies() {
        let api = FakeApi::shared();
        let store = views();
        let db = Arc::new(crate::db::tests::open_broken_db());
        let state = AppState::new(api, store.clone(), db);

        let err = run(&state, "theme").await.unwrap_err();

        assert_eq!(err.kind(), "Database");
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.notices(), vec![Notice::failure("Failed to save theme")]);
    }

    #[tokio::test]
    async fn test_restore_theme_applies_saved_value() {
        let (_api, store, state) = state();
        state.database.save_theme(Theme::Dark).unwrap();

        restore_theme(&state).unwrap();

        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(*state.theme.lock().unwrap(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_dispatch_refresh_and_quit() {
        let (api, store, state) = state();
        api.set_stats(serde_json::json!({"attacks": {"blacklisted": 2}, "status": {"blocked": 2}}));

        run(&state, "refresh stats").await.unwrap();
        let Some(Snapshot::Stats(charts)) = store.view(Collection::Stats) else {
            panic!("stats not rendered");
        };
        assert_eq!(charts.attacks.counts, vec![2]);

        assert_eq!(run(&state, "quit").await.unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn test_dispatch_help_notifies() {
        let (_api, store, state) = state();
        run(&state, "help").await.unwrap();
        assert_eq!(store.notices(), vec![Notice::info(HELP)]);
    }
}
