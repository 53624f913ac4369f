use serde::{Deserialize, Serialize};
use crate::enums::architecture_suggestion_type::ArchitectureSuggestionType;
use crate::enums::impact::Impact;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureSuggestion {
    pub suggestion_type: ArchitectureSuggestionType,
    pub impact: Impact,
    pub message: String,
    pub suggestion: String,
}

impl ArchitectureSuggestion {
    pub fn new(suggestion_type: ArchitectureSuggestionType, impact: Impact, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion_type,
            impact,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}
