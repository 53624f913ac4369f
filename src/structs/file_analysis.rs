use serde::{Deserialize, Serialize};
use crate::enums::language_family::LanguageFamily;
use crate::structs::optimization_suggestion::OptimizationSuggestion;
use crate::structs::security_issue::SecurityIssue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file_path: String,
    pub language: LanguageFamily,
    pub line_count: usize,
    pub security_issues: Vec<SecurityIssue>,
    pub optimization_suggestions: Vec<OptimizationSuggestion>,
}

impl FileAnalysis {
    pub fn has_findings(&self) -> bool {
        !self.security_issues.is_empty() || !self.optimization_suggestions.is_empty()
    }
}
