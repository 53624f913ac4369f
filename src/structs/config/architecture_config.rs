use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ArchitectureConfig {
    #[serde(default = "ConfigHelper::default_true")]
    pub enabled: bool,
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
