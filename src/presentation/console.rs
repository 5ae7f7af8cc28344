//! Terminal rendering of collection snapshots.
//!
//! Output goes to stdout; diagnostics stay on stderr through `tracing`.

use std::fmt::Write as _;
use std::io::Write as _;

use super::{Form, Notice, NoticeLevel, PresentationAdapter, Theme, ViewStore};
use crate::api::LogEntry;
use crate::config;
use crate::core::{ChartSeries, Snapshot};

/// Prints a snapshot whenever its collection's visible content changes.
pub struct ConsoleAdapter {
    views: ViewStore,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self { views: ViewStore::new() }
    }

    pub fn views(&self) -> &ViewStore {
        &self.views
    }

    fn print(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationAdapter for ConsoleAdapter {
    fn render(&self, snapshot: &Snapshot) {
        if self.views.store(snapshot) {
            self.print(&render_text(snapshot, self.views.theme()));
        }
    }

    fn notify(&self, notice: &Notice) {
        self.views.notify(notice);
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Failure => "FAILED",
        };
        self.print(&format!("[{tag}] {}", notice.message));
    }

    fn clear_form(&self, form: Form) {
        self.views.clear_form(form);
    }

    fn show_polling(&self, enabled: bool) {
        self.views.show_polling(enabled);
        let state = if enabled { "running" } else { "paused, `pause` again to resume" };
        self.print(&format!("-- log updates {state}"));
    }

    fn apply_theme(&self, theme: Theme) {
        self.views.apply_theme(theme);
        self.print(&format!("-- theme: {}", theme.as_str()));
    }
}

/// Text rendering of one snapshot.
pub fn render_text(snapshot: &Snapshot, theme: Theme) -> String {
    let rule = match theme {
        Theme::Light => '-',
        Theme::Dark => '=',
    };
    let mut text = String::new();
    let _ = writeln!(text, "{} {} {}", rule, snapshot.collection(), rule.to_string().repeat(40));
    match snapshot {
        Snapshot::Logs(entries) => {
            let _ = writeln!(
                text,
                "{:>6}  {:<26} {:<15} {:<6} {:<24} {:<8} {:<10} REASON",
                "ID", "TIMESTAMP", "IP", "METHOD", "PATH", "STATUS", "BODY"
            );
            for entry in entries {
                let _ = writeln!(text, "{}", format_log_row(entry));
            }
        }
        Snapshot::Blacklist(ips) => {
            if ips.is_empty() {
                let _ = writeln!(text, "  (empty)");
            }
            for ip in ips {
                let _ = writeln!(text, "  {ip}  [remove-ip {ip}]");
            }
        }
        Snapshot::Rules(rules) => {
            if rules.is_empty() {
                let _ = writeln!(text, "  (empty)");
            }
            for r in rules {
                let _ = writeln!(
                    text,
                    "  #{} {} ({})  [delete-rule {}]",
                    r.id, r.pattern, r.description, r.id
                );
            }
        }
        Snapshot::Stats(charts) => {
            let _ = writeln!(text, "Attack Attempts");
            text.push_str(&format_bar_chart(&charts.attacks));
            let _ = writeln!(text, "Request Status");
            text.push_str(&format_bar_chart(&charts.status));
        }
        Snapshot::Requests(count) => {
            let _ = writeln!(text, "  recent requests: {count}");
        }
    }
    text.trim_end().to_string()
}

fn format_log_row(entry: &LogEntry) -> String {
    format!(
        "{:>6}  {:<26} {:<15} {:<6} {:<24} {:<8} {:<10} {}",
        entry.id,
        entry.timestamp,
        entry.ip,
        entry.method,
        entry.path,
        entry.status.to_string(),
        dash_if_blank(entry.body.as_deref(), config::LOG_BODY_PREVIEW_CHARS),
        dash_if_blank(entry.reason.as_deref(), usize::MAX),
    )
}

/// `-` for a missing or empty field, otherwise the value truncated to `max_chars`.
pub fn dash_if_blank(value: Option<&str>, max_chars: usize) -> String {
    match value {
        None | Some("") => "-".to_string(),
        Some(v) if v.chars().count() > max_chars => {
            let cut: String = v.chars().take(max_chars).collect();
            format!("{cut}...")
        }
        Some(v) => v.to_string(),
    }
}

/// Horizontal bar chart scaled to the largest count.
pub fn format_bar_chart(series: &ChartSeries) -> String {
    const WIDTH: u64 = 30;
    if series.is_empty() {
        return "  (no data)\n".to_string();
    }
    let max = series.counts.iter().copied().max().unwrap_or(0).max(1);
    let label_width = series.categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (category, count) in series.categories.iter().zip(&series.counts) {
        let bar = "#".repeat((count * WIDTH / max) as usize);
        let _ = writeln!(out, "  {category:<label_width$} {bar} {count}");
    }
    out
}
