use serde::{Deserialize, Serialize};

/// Snapshot of the working copy, taken fresh on every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub current_branch: String,
    pub last_commit: String,
    /// Files touched by the latest commit.
    pub modified_files: Vec<String>,
    pub branches: Vec<String>,
    pub remote_url: Option<String>,
}
