use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationType {
    Complexity,
    Performance,
    Memory,
    Duplication,
    Style,
}

impl OptimizationType {
    pub fn label(&self) -> &'static str {
        match self {
            OptimizationType::Complexity => "Complexity",
            OptimizationType::Performance => "Performance",
            OptimizationType::Memory => "Memory",
            OptimizationType::Duplication => "Duplication",
            OptimizationType::Style => "Style",
        }
    }
}
