use serde::{Deserialize, Serialize};
use crate::enums::change_type::ChangeType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub change_type: ChangeType,
    /// Position in the new file; removals take the slot of the next surviving line.
    pub line_number: usize,
    pub content: String,
    pub suggestion: Option<String>,
}
