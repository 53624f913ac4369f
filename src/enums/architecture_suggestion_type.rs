use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectureSuggestionType {
    Structure,
    Organization,
    Dependency,
    Layering,
}

impl ArchitectureSuggestionType {
    pub fn label(&self) -> &'static str {
        match self {
            ArchitectureSuggestionType::Structure => "Structure",
            ArchitectureSuggestionType::Organization => "Organization",
            ArchitectureSuggestionType::Dependency => "Dependency",
            ArchitectureSuggestionType::Layering => "Layering",
        }
    }
}
