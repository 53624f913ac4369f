use crate::enums::analysis_mode::AnalysisMode;
use crate::helpers::config_helper::ConfigHelper;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub mode: AnalysisMode,

    #[serde(default = "ConfigHelper::default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Extensions to scan; empty means every supported extension.
    #[serde(default)]
    pub file_extensions: Vec<String>,

    #[serde(default = "ConfigHelper::default_max_file_size")]
    pub max_file_size: u64,

    #[serde(default = "ConfigHelper::default_max_files")]
    pub max_files: usize,

    #[serde(default = "ConfigHelper::default_parallel_files")]
    pub parallel_files: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::default(),
            exclude_patterns: ConfigHelper::default_exclude_patterns(),
            file_extensions: Vec::new(),
            max_file_size: ConfigHelper::default_max_file_size(),
            max_files: ConfigHelper::default_max_files(),
            parallel_files: ConfigHelper::default_parallel_files(),
        }
    }
}
