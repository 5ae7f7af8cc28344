//! Pure parsing of operator input into intents.
//!
//! These functions take plain strings (no shared state) and can be
//! unit-tested without a runtime.

use crate::api::Collection;
use crate::error::AppError;

/// An operator intent, decoupled from how it was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddIp { ip: String },
    RemoveIp { ip: String },
    AddRule { pattern: String, description: String },
    DeleteRule { id: i64 },
    ToggleTheme,
    TogglePolling,
    Refresh { collection: Collection },
    Help,
    Quit,
}

/// Separates a rule pattern from its description on the `add-rule` line.
pub const RULE_DESCRIPTION_SEPARATOR: &str = " -- ";

pub const HELP: &str = "\
commands:
  add-ip <ip>                          blacklist an IP
  remove-ip <ip>                       remove an IP from the blacklist
  add-rule <pattern> -- <description>  add a pattern rule
  delete-rule <id>                     delete a rule
  pause                                pause/resume log updates
  theme                                toggle dark/light theme
  refresh [logs|blacklist|rules|stats|requests]
  help, quit";

/// Parse one input line. Blank lines yield `None`.
///
/// Arguments are not validated beyond their syntax: empty values are passed
/// through so the mutation layer rejects them with the operator-facing message.
pub fn parse_intent(line: &str) -> Result<Option<Intent>, AppError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let intent = match verb {
        "add-ip" => Intent::AddIp { ip: rest.to_string() },
        "remove-ip" => Intent::RemoveIp { ip: rest.to_string() },
        "add-rule" => {
            let (pattern, description) = split_rule_args(rest);
            Intent::AddRule { pattern, description }
        }
        "delete-rule" => Intent::DeleteRule { id: parse_rule_id(rest)? },
        "theme" | "toggle-theme" => Intent::ToggleTheme,
        "pause" | "resume" | "toggle-polling" => Intent::TogglePolling,
        "refresh" => Intent::Refresh { collection: parse_collection(rest)? },
        "help" | "?" => Intent::Help,
        "quit" | "exit" => Intent::Quit,
        other => {
            return Err(AppError::Validation(format!(
                "Unknown command '{other}'; type `help` for a list"
            )))
        }
    };
    Ok(Some(intent))
}

fn split_rule_args(rest: &str) -> (String, String) {
    // A bare separator means no pattern; `--.*` is a pattern.
    if rest == "--" {
        return (String::new(), String::new());
    }
    if let Some(description) = rest.strip_prefix("-- ") {
        return (String::new(), description.trim().to_string());
    }
    // Split on the last separator: patterns may themselves contain `--`.
    match rest.rsplit_once(RULE_DESCRIPTION_SEPARATOR) {
        Some((pattern, description)) => (pattern.trim().to_string(), description.trim().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

fn parse_rule_id(rest: &str) -> Result<i64, AppError> {
    rest.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Rule id must be an integer, got '{rest}'")))
}

fn parse_collection(rest: &str) -> Result<Collection, AppError> {
    if rest.is_empty() {
        return Ok(Collection::Logs);
    }
    Collection::from_name(rest)
        .ok_or_else(|| AppError::Validation(format!("Unknown collection '{rest}'")))
}
