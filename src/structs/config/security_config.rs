use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "ConfigHelper::default_true")]
    pub enabled: bool,

    #[serde(default = "ConfigHelper::default_severity_threshold")]
    pub severity_threshold: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity_threshold: ConfigHelper::default_severity_threshold(),
        }
    }
}
