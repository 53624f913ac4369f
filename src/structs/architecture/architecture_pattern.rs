use serde::{Deserialize, Serialize};
use crate::enums::architecture_pattern_type::ArchitecturePatternType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitecturePattern {
    pub pattern_type: ArchitecturePatternType,
    pub confidence: f32,
    /// Directories or files that triggered the detection.
    pub evidence: Vec<String>,
}

impl ArchitecturePattern {
    pub fn detected(pattern_type: ArchitecturePatternType, evidence: Vec<String>) -> Self {
        Self {
            pattern_type,
            confidence: pattern_type.confidence(),
            evidence,
        }
    }
}
