use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use crate::structs::stored_report::StoredReport;

/// Rendered reports kept in memory for the report server.
pub struct ReportStore {
    reports: Arc<DashMap<String, StoredReport>>,
    next_sequence: AtomicU64,
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(DashMap::new()),
            next_sequence: AtomicU64::new(0),
        }
    }

    pub fn insert(&self, title: impl Into<String>, html: String) -> String {
        let id = Uuid::new_v4().to_string();
        let report = StoredReport {
            id: id.clone(),
            title: title.into(),
            html,
            created_at: Utc::now(),
            sequence: self.next_sequence.fetch_add(1, Ordering::SeqCst),
        };
        self.reports.insert(id.clone(), report);
        log::debug!("Stored report {}", id);
        id
    }

    pub fn get(&self, id: &str) -> Option<StoredReport> {
        self.reports.get(id).map(|entry| entry.value().clone())
    }

    pub fn latest_id(&self) -> Option<String> {
        self.reports
            .iter()
            .max_by_key(|entry| entry.value().sequence)
            .map(|entry| entry.key().clone())
    }

    /// `(id, title)` pairs, oldest first.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut reports: Vec<StoredReport> = self.reports.iter().map(|entry| entry.value().clone()).collect();
        reports.sort_by_key(|r| r.sequence);
        reports.into_iter().map(|r| (r.id, r.title)).collect()
    }

    pub fn remove(&self, id: &str) -> bool {
        self.reports.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}
