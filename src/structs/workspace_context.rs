use std::path::{Path, PathBuf};
use crate::enums::workspace_mode::WorkspaceMode;

/// The workspace the command runs in, passed explicitly instead of read from globals.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceContext {
    pub active: Option<PathBuf>,
    pub mode: WorkspaceMode,
}

impl WorkspaceContext {
    pub fn new(active: Option<PathBuf>, mode: WorkspaceMode) -> Self {
        Self { active, mode }
    }

    pub fn contains(&self, path: &Path) -> bool {
        match &self.active {
            Some(active) => path.starts_with(active),
            None => false,
        }
    }

    /// Whether analyzing `path` requires moving to a new workspace first.
    pub fn requires_switch(&self, path: &Path) -> bool {
        self.mode == WorkspaceMode::Switch && !self.contains(path)
    }
}
