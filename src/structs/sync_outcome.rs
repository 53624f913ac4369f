use std::path::PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub local_path: PathBuf,
    pub previous_head: Option<String>,
    pub current_head: String,
    pub head_changed: bool,
    pub cloned: bool,
    pub diff_report: Option<PathBuf>,
}
