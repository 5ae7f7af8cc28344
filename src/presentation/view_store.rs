//! In-memory view state keyed by collection, using DashMap for lock-free access.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use dashmap::DashMap;

use super::{Form, Notice, PresentationAdapter, Theme};
use crate::api::Collection;
use crate::core::Snapshot;

/// Latest rendered snapshot per collection, plus the operator-facing side state.
pub struct ViewStore {
    views: DashMap<Collection, Snapshot>,
    notices: Mutex<Vec<Notice>>,
    cleared_forms: Mutex<Vec<Form>>,
    polling: AtomicBool,
    theme: Mutex<Theme>,
    renders: AtomicUsize,
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            views: DashMap::new(),
            notices: Mutex::new(Vec::new()),
            cleared_forms: Mutex::new(Vec::new()),
            polling: AtomicBool::new(true),
            theme: Mutex::new(Theme::default()),
            renders: AtomicUsize::new(0),
        }
    }

    /// Replace the stored view. Returns `true` when the visible content changed.
    pub fn store(&self, snapshot: &Snapshot) -> bool {
        self.renders.fetch_add(1, Ordering::Relaxed);
        let previous = self.views.insert(snapshot.collection(), snapshot.clone());
        previous.as_ref() != Some(snapshot)
    }

    pub fn view(&self, collection: Collection) -> Option<Snapshot> {
        self.views.get(&collection).map(|entry| entry.value().clone())
    }

    pub fn blacklist(&self) -> Option<Vec<String>> {
        match self.view(Collection::Blacklist)? {
            Snapshot::Blacklist(ips) => Some(ips),
            _ => None,
        }
    }

    pub fn rule_ids(&self) -> Option<Vec<i64>> {
        match self.view(Collection::Rules)? {
            Snapshot::Rules(rules) => Some(rules.iter().map(|r| r.id).collect()),
            _ => None,
        }
    }

    /// Total `render` calls received, including ones that changed nothing.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::Relaxed)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn cleared_forms(&self) -> Vec<Form> {
        self.cleared_forms.lock().unwrap().clone()
    }

    pub fn polling_shown(&self) -> bool {
        self.polling.load(Ordering::Relaxed)
    }

    pub fn theme(&self) -> Theme {
        *self.theme.lock().unwrap()
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationAdapter for ViewStore {
    fn render(&self, snapshot: &Snapshot) {
        self.store(snapshot);
    }

    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn clear_form(&self, form: Form) {
        self.cleared_forms.lock().unwrap().push(form);
    }

    fn show_polling(&self, enabled: bool) {
        self.polling.store(enabled, Ordering::Relaxed);
    }

    fn apply_theme(&self, theme: Theme) {
        *self.theme.lock().unwrap() = theme;
    }
}
