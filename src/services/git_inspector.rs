use std::path::Path;
use std::sync::Arc;
use crate::config::constants::EMPTY_TREE_HASH;
use crate::enums::git_error::GitError;
use crate::helpers::git_helper::{git_args, output_lines, unquoted_path_args};
use crate::structs::repository_info::RepositoryInfo;
use crate::traits::git_runner::GitRunner;

/// Read-only queries against a working copy.
pub struct GitInspector {
    git: Arc<dyn GitRunner>,
}

impl GitInspector {
    pub fn new(git: Arc<dyn GitRunner>) -> Self {
        Self { git }
    }

    pub async fn is_working_copy(&self, path: &Path) -> bool {
        match self.git.run(path, git_args(&["rev-parse", "--is-inside-work-tree"])).await {
            Ok(output) => output.trim() == "true",
            Err(_) => false,
        }
    }

    pub async fn top_level(&self, path: &Path) -> Result<String, GitError> {
        let output = self.git.run(path, git_args(&["rev-parse", "--show-toplevel"])).await?;
        Ok(output.trim().to_string())
    }

    /// `None` for a repository without commits.
    pub async fn head(&self, path: &Path) -> Option<String> {
        self.git
            .run(path, git_args(&["rev-parse", "HEAD"]))
            .await
            .ok()
            .map(|o| o.trim().to_string())
            .filter(|h| !h.is_empty())
    }

    /// Fails on a detached HEAD, where there is no branch to pull into.
    pub async fn current_branch(&self, path: &Path) -> Result<String, GitError> {
        let output = self.git.run(path, git_args(&["rev-parse", "--abbrev-ref", "HEAD"])).await?;
        match output.trim() {
            "" | "HEAD" => Err(GitError::InvalidOutput {
                command: "rev-parse".to_string(),
                reason: "HEAD is detached, check out a branch first".to_string(),
            }),
            branch => Ok(branch.to_string()),
        }
    }

    pub async fn remote_url(&self, path: &Path) -> Option<String> {
        self.git
            .run(path, git_args(&["remote", "get-url", "origin"]))
            .await
            .ok()
            .map(|o| o.trim().to_string())
            .filter(|u| !u.is_empty())
    }

    /// Remote tracking branch of `branch`, falling back to `origin/<branch>`.
    pub async fn upstream(&self, path: &Path, branch: &str) -> String {
        let spec = format!("{}@{{upstream}}", branch);
        match self.git.run(path, git_args(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", &spec])).await {
            Ok(output) if !output.trim().is_empty() => output.trim().to_string(),
            _ => format!("origin/{}", branch),
        }
    }

    pub async fn has_uncommitted_changes(&self, path: &Path) -> Result<bool, GitError> {
        let output = self.git.run(path, git_args(&["status", "--porcelain"])).await?;
        Ok(!output.trim().is_empty())
    }

    pub async fn merge_in_progress(&self, path: &Path) -> bool {
        self.git
            .run(path, git_args(&["rev-parse", "-q", "--verify", "MERGE_HEAD"]))
            .await
            .is_ok()
    }

    /// Parent of `commit`, or the empty tree for a root commit.
    pub async fn parent_of(&self, path: &Path, commit: &str) -> String {
        let spec = format!("{}^", commit);
        match self.git.run(path, git_args(&["rev-parse", "-q", "--verify", &spec])).await {
            Ok(output) if !output.trim().is_empty() => output.trim().to_string(),
            _ => EMPTY_TREE_HASH.to_string(),
        }
    }

    pub async fn diff(&self, path: &Path, from: &str, to: &str) -> Result<String, GitError> {
        self.git.run(path, unquoted_path_args(&["diff", "--no-color", "--no-ext-diff", from, to])).await
    }

    pub async fn changed_files(&self, path: &Path, from: &str, to: &str) -> Result<Vec<String>, GitError> {
        let output = self.git.run(path, unquoted_path_args(&["diff", "--name-only", from, to])).await?;
        Ok(output_lines(&output))
    }

    /// Unified diff of the latest commit against its parent; empty without commits.
    pub async fn latest_change(&self, path: &Path) -> Result<String, GitError> {
        let head = match self.head(path).await {
            Some(head) => head,
            None => return Ok(String::new()),
        };
        let parent = self.parent_of(path, &head).await;
        self.diff(path, &parent, &head).await
    }

    pub async fn branches(&self, path: &Path) -> Vec<String> {
        match self.git.run(path, git_args(&["branch", "-a", "--format=%(refname:short)"])).await {
            Ok(output) => output_lines(&output)
                .into_iter()
                .filter(|b| !b.ends_with("/HEAD") && b != "origin")
                .collect(),
            Err(e) => {
                log::warn!("⚠️ Could not list branches: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn repository_info(&self, path: &Path) -> RepositoryInfo {
        let last_commit = self.head(path).await.unwrap_or_default();
        let modified_files = if last_commit.is_empty() {
            Vec::new()
        } else {
            let parent = self.parent_of(path, &last_commit).await;
            self.changed_files(path, &parent, &last_commit).await.unwrap_or_else(|e| {
                log::warn!("⚠️ Could not list modified files: {}", e);
                Vec::new()
            })
        };

        RepositoryInfo {
            current_branch: self.current_branch(path).await.unwrap_or_default(),
            last_commit,
            modified_files,
            branches: self.branches(path).await,
            remote_url: self.remote_url(path).await,
        }
    }
}
