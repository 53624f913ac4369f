use serde::{Deserialize, Serialize};
use crate::enums::impact::Impact;
use crate::enums::optimization_type::OptimizationType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub suggestion_type: OptimizationType,
    pub impact: Impact,
    pub message: String,
    pub file_path: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub suggestion: String,
    pub rule_id: String,
}
