//! Rendering sinks for collection snapshots.
//!
//! - [`PresentationAdapter`]: the interface the engine renders through
//! - [`ViewStore`]: in-memory latest-snapshot store
//! - [`ConsoleAdapter`]: terminal rendering on top of a `ViewStore`

mod console;
mod view_store;

use serde::Serialize;

use crate::core::Snapshot;

pub use console::{render_text, ConsoleAdapter};
pub use view_store::ViewStore;

/// Sink for everything the operator sees.
///
/// Implementations must be idempotent (the same snapshot twice leaves an
/// equivalent visible state) and must never originate network calls.
pub trait PresentationAdapter: Send + Sync {
    /// Replace the displayed content of `snapshot.collection()`.
    fn render(&self, snapshot: &Snapshot);

    /// Raise an operator-facing alert.
    fn notify(&self, notice: &Notice);

    /// Clear the input fields of a form after a successful submission.
    fn clear_form(&self, form: Form);

    /// Reflect the poll scheduler state (the pause/resume control label).
    fn show_polling(&self, enabled: bool);

    fn apply_theme(&self, theme: Theme);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Info,
    Failure,
}

/// Operator-facing alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Failure, message: message.into() }
    }
}

/// Operator input forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Form {
    Blacklist,
    Rule,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
