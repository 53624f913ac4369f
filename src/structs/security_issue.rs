use serde::{Deserialize, Serialize};
use crate::enums::security_issue_type::SecurityIssueType;
use crate::enums::severity::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityIssue {
    pub issue_type: SecurityIssueType,
    pub severity: Severity,
    pub message: String,
    pub file_path: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub suggestion: String,
    pub rule_id: String,
}
