use serde::{Deserialize, Serialize};
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::structs::config::architecture_config::ArchitectureConfig;
use crate::structs::config::optimization_config::OptimizationConfig;
use crate::structs::config::output_config::OutputConfig;
use crate::structs::config::security_config::SecurityConfig;
use crate::structs::config::sync_config::SyncConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub optimization: OptimizationConfig,

    #[serde(default)]
    pub architecture: ArchitectureConfig,

    #[serde(default)]
    pub output: OutputConfig,
}
