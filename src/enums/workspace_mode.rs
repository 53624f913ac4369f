use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceMode {
    /// Keep the current workspace and analyze the working copy from there.
    Stay,
    /// Re-run the command with the working copy as the active workspace.
    Switch,
}

impl Default for WorkspaceMode {
    fn default() -> Self {
        WorkspaceMode::Stay
    }
}
