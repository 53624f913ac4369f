use serde::{Deserialize, Serialize};
use crate::structs::diff::code_difference::CodeDifference;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStatistics {
    pub files_changed: usize,
    pub additions: usize,
    pub removals: usize,
}

impl DiffStatistics {
    pub fn from_differences(differences: &[CodeDifference]) -> Self {
        Self {
            files_changed: differences.len(),
            additions: differences.iter().map(|d| d.additions()).sum(),
            removals: differences.iter().map(|d| d.removals()).sum(),
        }
    }
}
