pub mod analysis_result;
pub mod architecture;
pub mod cli;
pub mod diff;
pub mod config;
pub mod file_analysis;
pub mod optimization_suggestion;
pub mod pattern_rule;
pub mod repository_info;
pub mod repository_url;
pub mod security_issue;
pub mod stored_report;
pub mod sync_outcome;
pub mod validation_result;
pub mod workspace_context;
