//! Unified error type for the console engine.
//!
//! `AppError` is returned by the resource client, the mutation controller and
//! every dispatched command. It serializes as `{ "kind": "...", "message": "..." }`
//! so a front end can programmatically distinguish error categories.

use serde::ser::SerializeStruct;

/// Application-level error returned by the console engine.
///
/// Each variant maps to a distinct failure domain. `Network` and `Server`
/// come from the management API, `Validation` is raised before any call is
/// made, and the rest belong to local plumbing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// The request could not be sent or its response could not be read.
    #[error("{0}")]
    Network(String),

    /// The management API answered with a non-success status.
    #[error("{}", server_display(*status, message.as_deref()))]
    Server { status: u16, message: Option<String> },

    /// Invalid or missing operator input.
    #[error("{0}")]
    Validation(String),

    /// A response body did not have the shape expected for its collection.
    #[error("{0}")]
    Decode(String),

    /// Errors from the SQLite preference store.
    #[error("{0}")]
    Database(String),

    /// I/O and OS-level errors (stdin, data directory).
    #[error("{0}")]
    Io(String),
}

fn server_display(status: u16, message: Option<&str>) -> String {
    match message {
        Some(m) => m.to_string(),
        None => format!("server returned status {status}"),
    }
}

impl AppError {
    /// Returns the error kind as a string matching the variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Network(_) => "Network",
            AppError::Server { .. } => "Server",
            AppError::Validation(_) => "Validation",
            AppError::Decode(_) => "Decode",
            AppError::Database(_) => "Database",
            AppError::Io(_) => "Io",
        }
    }

    /// HTTP status of a server rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The clearest message an operator can be shown.
    ///
    /// Server rejections and validation text are passed through; transport
    /// and local failures collapse to `generic`.
    pub fn operator_message(&self, generic: &str) -> String {
        match self {
            AppError::Server { .. } | AppError::Validation(_) => self.to_string(),
            _ => generic.to_string(),
        }
    }
}

/// Custom Serialize: produces `{ "kind": "Variant", "message": "..." }`.
impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("AppError", 2)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

// ---- From implementations for ergonomic error conversion ----

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Database(format!("{err:#}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}
