use std::path::Path;
use async_trait::async_trait;
use crate::enums::git_error::GitError;

/// Runs the external version-control tool.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Runs `git <args>` inside `cwd` and returns its stdout.
    async fn run(&self, cwd: &Path, args: Vec<String>) -> Result<String, GitError>;
}
