use serde::{Deserialize, Serialize};
use crate::enums::workspace_mode::WorkspaceMode;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SyncConfig {
    /// Where working copies are cloned; prompted for when unset.
    #[serde(default)]
    pub clone_root: Option<String>,

    #[serde(default = "ConfigHelper::default_true")]
    pub auto_stash: bool,

    #[serde(default = "ConfigHelper::default_true")]
    pub fetch_tags: bool,

    #[serde(default)]
    pub workspace_mode: WorkspaceMode,

    #[serde(default = "ConfigHelper::default_true")]
    pub write_diff_reports: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            clone_root: None,
            auto_stash: true,
            fetch_tags: true,
            workspace_mode: WorkspaceMode::default(),
            write_diff_reports: true,
        }
    }
}
