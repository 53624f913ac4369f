use thiserror::Error;

/// Failures of the external `git` process.
#[derive(Debug, Clone, Error)]
pub enum GitError {
    #[error("git {command} failed (status {status:?}): {stderr}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    #[error("could not run git {command}: {reason}")]
    Spawn {
        command: String,
        reason: String,
    },
    #[error("unexpected output from git {command}: {reason}")]
    InvalidOutput {
        command: String,
        reason: String,
    },
}

impl GitError {
    pub fn stderr(&self) -> &str {
        match self {
            GitError::CommandFailed { stderr, .. } => stderr,
            GitError::Spawn { reason, .. } | GitError::InvalidOutput { reason, .. } => reason,
        }
    }
}
