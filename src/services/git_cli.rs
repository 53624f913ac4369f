use std::path::Path;
use async_trait::async_trait;
use tokio::process::Command;
use crate::enums::git_error::GitError;
use crate::helpers::git_helper::subcommand;
use crate::traits::git_runner::GitRunner;

/// `GitRunner` backed by the `git` binary on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self { binary: "git".to_string() }
    }

    /// Whether a usable git binary is installed.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitRunner for GitCli {
    async fn run(&self, cwd: &Path, args: Vec<String>) -> Result<String, GitError> {
        let command = subcommand(&args);
        log::debug!("🔧 git {} (in {})", args.join(" "), cwd.display());

        let output = Command::new(&self.binary)
            .args(&args)
            .current_dir(cwd)
            // Never block on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Err(GitError::CommandFailed {
                command,
                status: output.status.code(),
                // Merge conflicts are reported on stdout
                stderr: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
