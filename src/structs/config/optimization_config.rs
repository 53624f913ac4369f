use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OptimizationConfig {
    #[serde(default = "ConfigHelper::default_true")]
    pub enabled: bool,

    #[serde(default = "ConfigHelper::default_max_function_lines")]
    pub max_function_lines: usize,

    #[serde(default = "ConfigHelper::default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    #[serde(default = "ConfigHelper::default_min_duplicate_line_length")]
    pub min_duplicate_line_length: usize,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_function_lines: ConfigHelper::default_max_function_lines(),
            max_nesting_depth: ConfigHelper::default_max_nesting_depth(),
            min_duplicate_line_length: ConfigHelper::default_min_duplicate_line_length(),
        }
    }
}
