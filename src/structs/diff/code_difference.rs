use serde::{Deserialize, Serialize};
use crate::enums::change_type::ChangeType;
use crate::structs::diff::change::Change;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDifference {
    pub file_path: String,
    pub changes: Vec<Change>,
}

impl CodeDifference {
    pub fn additions(&self) -> usize {
        self.changes.iter().filter(|c| c.change_type == ChangeType::Add).count()
    }

    pub fn removals(&self) -> usize {
        self.changes.iter().filter(|c| c.change_type == ChangeType::Remove).count()
    }
}
