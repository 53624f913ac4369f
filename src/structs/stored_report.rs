use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: String,
    pub title: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
    /// Insertion order; the highest value is the latest report.
    pub sequence: u64,
}
