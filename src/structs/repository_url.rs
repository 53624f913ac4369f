use serde::{Deserialize, Serialize};

/// A remote URL that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryUrl {
    pub url: String,
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepositoryUrl {
    /// `host/owner/name`, used to compare remotes regardless of scheme and suffix.
    pub fn canonical(&self) -> String {
        format!("{}/{}/{}", self.host, self.owner, self.name).to_lowercase()
    }
}
