use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::analysis_mode::AnalysisMode;
use crate::enums::severity::Severity;
use crate::structs::architecture::architecture_report::ArchitectureReport;
use crate::structs::diff::code_difference::CodeDifference;
use crate::structs::file_analysis::FileAnalysis;
use crate::structs::repository_info::RepositoryInfo;
use crate::structs::sync_outcome::SyncOutcome;

/// Everything one run produced, handed to the report renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub target: String,
    pub repository_info: RepositoryInfo,
    /// Mode actually used; `Auto` is always resolved.
    pub mode: AnalysisMode,
    pub files: Vec<FileAnalysis>,
    pub architecture: Option<ArchitectureReport>,
    pub recent_changes: Vec<CodeDifference>,
    pub sync: Option<SyncOutcome>,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn security_issue_count(&self) -> usize {
        self.files.iter().map(|f| f.security_issues.len()).sum()
    }

    pub fn optimization_count(&self) -> usize {
        self.files.iter().map(|f| f.optimization_suggestions.len()).sum()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.security_issues.iter())
            .filter(|i| i.severity == severity)
            .count()
    }
}
