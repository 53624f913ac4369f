pub mod architecture_analyzer;
pub mod diff_parser;
pub mod diff_report_writer;
pub mod git_cli;
pub mod git_inspector;
pub mod optimization_analyzer;
pub mod repo_scanner;
pub mod repository_analyzer;
pub mod repository_synchronizer;
pub mod rule_engine;
pub mod security_analyzer;
