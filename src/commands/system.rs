//! Polling, theme, and manual refresh commands.

use crate::api::Collection;
use crate::core::RefreshOutcome;
use crate::error::AppError;
use crate::presentation::{Notice, Theme};

use super::state::AppState;

/// Flip the log poll scheduler between RUNNING and PAUSED.
///
/// Resuming needs no extra work here: the scheduler refreshes immediately
/// when it observes the transition.
pub fn toggle_polling(state: &AppState) -> bool {
    let enabled = state.polling.toggle();
    state.adapter.show_polling(enabled);
    enabled
}

/// Apply the theme persisted by an earlier session.
pub fn restore_theme(state: &AppState) -> Result<Theme, AppError> {
    let theme = state.database.load_theme()?;
    *state.theme.lock().unwrap() = theme;
    state.adapter.apply_theme(theme);
    Ok(theme)
}

/// Switch dark/light and persist the choice.
///
/// The new theme is applied even if it cannot be persisted.
pub fn toggle_theme(state: &AppState) -> Result<Theme, AppError> {
    let theme = {
        let mut current = state.theme.lock().unwrap();
        *current = current.toggled();
        *current
    };
    state.adapter.apply_theme(theme);
    if let Err(e) = state.database.save_theme(theme) {
        state.adapter.notify(&Notice::failure("Failed to save theme"));
        return Err(AppError::Database(format!("{e:#}")));
    }
    tracing::info!("Theme set to {}", theme.as_str());
    Ok(theme)
}

/// Re-fetch one collection on demand.
pub async fn refresh(state: &AppState, collection: Collection) -> RefreshOutcome {
    state.synchronizer(collection).refresh().await
}
