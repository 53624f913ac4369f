use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ArchitecturePatternType {
    Mvc,
    CleanArchitecture,
    Microservices,
}

impl ArchitecturePatternType {
    pub fn label(&self) -> &'static str {
        match self {
            ArchitecturePatternType::Mvc => "MVC",
            ArchitecturePatternType::CleanArchitecture => "Clean Architecture",
            ArchitecturePatternType::Microservices => "Microservices",
        }
    }

    /// Fixed confidence attached to a detection of this pattern.
    pub fn confidence(&self) -> f32 {
        match self {
            ArchitecturePatternType::Mvc => 0.8,
            ArchitecturePatternType::CleanArchitecture => 0.85,
            ArchitecturePatternType::Microservices => 0.7,
        }
    }
}
