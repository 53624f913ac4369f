use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq)]
pub enum ChangeType {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "remove")]
    Remove,
    #[serde(rename = "modify")]
    Modify,
}

impl ChangeType {
    /// Classifies a hunk body line by its leading marker.
    pub fn from_marker(line: &str) -> Option<Self> {
        match line.chars().next() {
            Some('+') => Some(ChangeType::Add),
            Some('-') => Some(ChangeType::Remove),
            Some(' ') | None => Some(ChangeType::Modify),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ChangeType::Add => "+",
            ChangeType::Remove => "-",
            ChangeType::Modify => " ",
        }
    }
}
