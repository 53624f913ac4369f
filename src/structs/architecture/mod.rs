pub mod architecture_pattern;
pub mod architecture_report;
pub mod architecture_suggestion;
pub mod dependency_info;
pub mod directory_node;
