pub mod analysis_mode;
pub mod architecture_pattern_type;
pub mod architecture_suggestion_type;
pub mod change_type;
pub mod commands;
pub mod git_error;
pub mod impact;
pub mod language_family;
pub mod optimization_type;
pub mod organization_style;
pub mod pull_strategy;
pub mod security_issue_type;
pub mod severity;
pub mod workspace_mode;
