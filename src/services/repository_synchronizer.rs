use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::config::constants::{ALLOWED_HOSTS, ALLOWED_URL_SCHEME, RECOVERY_BRANCH_PREFIX, STASH_MESSAGE};
use crate::enums::git_error::GitError;
use crate::enums::pull_strategy::PullStrategy;
use crate::errors::{RepolyzerError, RepolyzerResult};
use crate::helpers::git_helper::{git_args, normalize_remote, short_hash};
use crate::helpers::path_helper::canonical_or_self;
use crate::services::diff_report_writer::DiffReportWriter;
use crate::services::git_inspector::GitInspector;
use crate::structs::config::sync_config::SyncConfig;
use crate::structs::repository_url::RepositoryUrl;
use crate::structs::sync_outcome::SyncOutcome;
use crate::structs::workspace_context::WorkspaceContext;
use crate::traits::diff_presenter::DiffPresenter;
use crate::traits::git_runner::GitRunner;

/// Brings a local working copy in line with its remote: clone when missing,
/// otherwise stash, fetch, and pull through the fallback chain.
pub struct RepositorySynchronizer {
    git: Arc<dyn GitRunner>,
    inspector: GitInspector,
    config: SyncConfig,
    presenter: Arc<dyn DiffPresenter>,
}

impl RepositorySynchronizer {
    pub fn new(git: Arc<dyn GitRunner>, config: SyncConfig, presenter: Arc<dyn DiffPresenter>) -> Self {
        Self {
            inspector: GitInspector::new(git.clone()),
            git,
            config,
            presenter,
        }
    }

    pub fn validate_url(url: &str) -> RepolyzerResult<RepositoryUrl> {
        let invalid = |constraint: &str| {
            RepolyzerError::validation_error(
                "repository_url",
                url,
                constraint,
                Some("Use a URL like https://github.com/<owner>/<repository>"),
            )
        };

        let trimmed = url.trim();
        let rest = trimmed
            .strip_prefix(ALLOWED_URL_SCHEME)
            .ok_or_else(|| invalid("must start with https://"))?;

        let rest = rest.trim_end_matches('/');
        let rest = rest.strip_suffix(".git").unwrap_or(rest);
        let mut segments = rest.split('/');
        let host = segments.next().unwrap_or_default().to_lowercase();
        if !ALLOWED_HOSTS.contains(&host.as_str()) {
            return Err(invalid(&format!("host must be one of {}", ALLOWED_HOSTS.join(", "))));
        }

        let path: Vec<&str> = segments.collect();
        if path.len() < 2 || path.iter().any(|s| s.is_empty()) {
            return Err(invalid("must name an owner and a repository"));
        }
        let name = path[path.len() - 1].to_string();
        let owner = path[..path.len() - 1].join("/");

        Ok(RepositoryUrl {
            url: trimmed.to_string(),
            host,
            owner,
            name,
        })
    }

    pub fn local_path_for(url: &RepositoryUrl, clone_root: &Path) -> PathBuf {
        clone_root.join(&url.name)
    }

    pub async fn sync(&self, url: &str, clone_root: &Path, workspace: &WorkspaceContext) -> RepolyzerResult<SyncOutcome> {
        let remote = Self::validate_url(url)?;
        let local_path = Self::local_path_for(&remote, clone_root);

        // Signalled before any git command runs.
        if workspace.requires_switch(&local_path) {
            log::info!("📂 Working copy is outside the active workspace, switching to {}", local_path.display());
            return Err(RepolyzerError::workspace_switched(&local_path.display().to_string()));
        }

        log::info!("🔄 Syncing {} into {}", remote.canonical(), local_path.display());
        self.ensure_working_copy(&remote, &local_path).await
    }

    pub async fn ensure_working_copy(&self, remote: &RepositoryUrl, local_path: &Path) -> RepolyzerResult<SyncOutcome> {
        if !local_path.exists() {
            return self.clone_repository(remote, local_path).await;
        }

        if !self.is_matching_working_copy(remote, local_path).await {
            return Err(RepolyzerError::validation_error(
                "clone_dir",
                &local_path.display().to_string(),
                &format!("existing directory is not a working copy of {}", remote.url),
                Some("Remove the directory or choose another clone directory"),
            ));
        }

        self.update(remote, local_path).await
    }

    async fn clone_repository(&self, remote: &RepositoryUrl, local_path: &Path) -> RepolyzerResult<SyncOutcome> {
        let parent = local_path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        tokio::fs::create_dir_all(&parent).await.map_err(|e| {
            RepolyzerError::file_error(&parent.display().to_string(), "create clone directory", &e.to_string())
        })?;

        log::info!("📥 Cloning {}", remote.url);
        let target = local_path.display().to_string();
        self.git
            .run(&parent, git_args(&["clone", &remote.url, &target]))
            .await
            .map_err(|e| RepolyzerError::repo_error(&remote.url, "clone", e.stderr()))?;

        let current_head = self.inspector.head(local_path).await.unwrap_or_default();
        log::info!("✅ Cloned at {}", short_hash(&current_head));
        Ok(SyncOutcome {
            local_path: local_path.to_path_buf(),
            previous_head: None,
            current_head,
            head_changed: false,
            cloned: true,
            diff_report: None,
        })
    }

    async fn is_matching_working_copy(&self, remote: &RepositoryUrl, local_path: &Path) -> bool {
        if !self.inspector.is_working_copy(local_path).await {
            log::debug!("{} is not inside a working copy", local_path.display());
            return false;
        }
        match self.inspector.top_level(local_path).await {
            Ok(top) if canonical_or_self(Path::new(&top)) == canonical_or_self(local_path) => {}
            _ => {
                log::debug!("{} is nested inside another working copy", local_path.display());
                return false;
            }
        }
        match self.inspector.remote_url(local_path).await {
            Some(origin) => normalize_remote(&origin) == normalize_remote(&remote.url),
            None => false,
        }
    }

    async fn update(&self, remote: &RepositoryUrl, local_path: &Path) -> RepolyzerResult<SyncOutcome> {
        let previous_head = self.inspector.head(local_path).await;
        let dirty = self
            .inspector
            .has_uncommitted_changes(local_path)
            .await
            .map_err(|e| RepolyzerError::repo_error(&remote.url, "status", e.stderr()))?;

        let stashed = if dirty && self.config.auto_stash {
            self.git
                .run(local_path, git_args(&["stash", "push", "--include-untracked", "-m", STASH_MESSAGE]))
                .await
                .map_err(|e| RepolyzerError::repo_error(&remote.url, "stash", e.stderr()))?;
            log::info!("📦 Stashed local changes");
            true
        } else {
            if dirty {
                log::warn!("⚠️ Working copy has uncommitted changes and auto_stash is off");
            }
            false
        };

        let pulled = self.fetch_and_pull(remote, local_path, dirty && !stashed).await;

        if stashed {
            if let Err(e) = self.git.run(local_path, git_args(&["stash", "pop"])).await {
                log::warn!("⚠️ Could not restore stashed changes, they remain in the stash: {}", e.stderr());
            } else {
                log::info!("📦 Restored stashed changes");
            }
        }
        pulled?;

        let current_head = self.inspector.head(local_path).await.unwrap_or_default();
        let head_changed = previous_head.as_deref().map(|p| p != current_head).unwrap_or(false);

        let diff_report = match (&previous_head, head_changed) {
            (Some(previous), true) => {
                log::info!("🆕 HEAD moved {} -> {}", short_hash(previous), short_hash(&current_head));
                self.report_head_change(local_path, previous, &current_head).await
            }
            _ => {
                log::info!("✅ Already up to date");
                None
            }
        };

        Ok(SyncOutcome {
            local_path: local_path.to_path_buf(),
            previous_head,
            current_head,
            head_changed,
            cloned: false,
            diff_report,
        })
    }

    async fn fetch_and_pull(&self, remote: &RepositoryUrl, local_path: &Path, unprotected_changes: bool) -> RepolyzerResult<()> {
        let fetch = if self.config.fetch_tags {
            git_args(&["fetch", "--all", "--tags"])
        } else {
            git_args(&["fetch", "--all"])
        };
        self.git
            .run(local_path, fetch)
            .await
            .map_err(|e| RepolyzerError::repo_error(&remote.url, "fetch", e.stderr()))?;

        let branch = self
            .inspector
            .current_branch(local_path)
            .await
            .map_err(|e| RepolyzerError::repo_error(&remote.url, "rev-parse", e.stderr()))?;

        let mut last_error = String::new();
        for strategy in PullStrategy::SEQUENCE {
            if strategy == PullStrategy::BranchResetMerge && unprotected_changes {
                log::warn!("⚠️ Skipping {} to protect uncommitted changes", strategy.name());
                continue;
            }
            match self.run_strategy(strategy, local_path, &branch).await {
                Ok(()) => {
                    log::info!("⬇️ Updated {} via {}", branch, strategy.name());
                    return Ok(());
                }
                Err(e) => {
                    log::warn!("⚠️ {} failed: {}", strategy.name(), e.stderr());
                    last_error = e.stderr().to_string();
                }
            }
        }

        self.abort_merge(local_path).await;
        Err(RepolyzerError::merge_conflict(
            &remote.url,
            &branch,
            &format!("manual resolution required: {}", last_error),
        ))
    }

    async fn run_strategy(&self, strategy: PullStrategy, local_path: &Path, branch: &str) -> Result<(), GitError> {
        match strategy {
            PullStrategy::Plain => self.git.run(local_path, git_args(&["pull"])).await.map(|_| ()),
            PullStrategy::BranchResetMerge => self.branch_reset_merge(local_path, branch).await,
        }
    }

    async fn branch_reset_merge(&self, local_path: &Path, branch: &str) -> Result<(), GitError> {
        if self.inspector.merge_in_progress(local_path).await {
            self.abort_merge(local_path).await;
        }

        let upstream = self.inspector.upstream(local_path, branch).await;
        let disposable = format!("{}-{}", RECOVERY_BRANCH_PREFIX, &uuid::Uuid::new_v4().simple().to_string()[..8]);
        self.git.run(local_path, git_args(&["checkout", "-b", &disposable])).await?;

        let steps: [Vec<String>; 4] = [
            git_args(&["reset", "--hard", &upstream]),
            git_args(&["checkout", branch]),
            git_args(&["merge", "--no-edit", &disposable]),
            git_args(&["branch", "-D", &disposable]),
        ];
        for args in steps {
            if let Err(e) = self.git.run(local_path, args).await {
                self.abort_merge(local_path).await;
                let _ = self.git.run(local_path, git_args(&["checkout", branch])).await;
                let _ = self.git.run(local_path, git_args(&["branch", "-D", &disposable])).await;
                return Err(e);
            }
        }
        Ok(())
    }

    async fn abort_merge(&self, local_path: &Path) {
        if let Err(e) = self.git.run(local_path, git_args(&["merge", "--abort"])).await {
            log::debug!("merge --abort: {}", e.stderr());
        }
    }

    /// Never fails the sync; problems are logged.
    async fn report_head_change(&self, local_path: &Path, previous: &str, current: &str) -> Option<PathBuf> {
        let report = if self.config.write_diff_reports {
            match self.inspector.diff(local_path, previous, current).await {
                Ok(diff_text) => match DiffReportWriter::write(local_path, previous, current, &diff_text).await {
                    Ok(path) => Some(path),
                    Err(e) => {
                        log::warn!("⚠️ {}", e.user_message());
                        None
                    }
                },
                Err(e) => {
                    log::warn!("⚠️ Could not diff {}..{}: {}", short_hash(previous), short_hash(current), e.stderr());
                    None
                }
            }
        } else {
            None
        };

        self.presenter.present_diff(previous, current, report.as_deref());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use crate::enums::workspace_mode::WorkspaceMode;
    use crate::traits::git_runner::MockGitRunner;

    const URL: &str = "https://github.com/acme/widgets";

    #[derive(Default)]
    struct RecordingPresenter {
        diffs: Mutex<Vec<(String, String, Option<PathBuf>)>>,
    }

    impl DiffPresenter for RecordingPresenter {
        fn present_diff(&self, previous: &str, current: &str, report_path: Option<&Path>) {
            self.diffs
                .lock()
                .unwrap()
                .push((previous.to_string(), current.to_string(), report_path.map(Path::to_path_buf)));
        }

        fn present_report(&self, _report_path: &Path) {}
    }

    fn failure(command: &str) -> GitError {
        GitError::CommandFailed {
            command: command.to_string(),
            status: Some(1),
            stderr: format!("{} failed", command),
        }
    }

    fn scripted<F>(responder: F) -> (Arc<MockGitRunner>, Arc<Mutex<Vec<String>>>)
    where
        F: Fn(&str) -> Result<String, GitError> + Send + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let log = calls.clone();
        let mut mock = MockGitRunner::new();
        mock.expect_run().returning(move |_, args| {
            let line = args.join(" ");
            log.lock().unwrap().push(line.clone());
            responder(&line)
        });
        (Arc::new(mock), calls)
    }

    /// Answers for an existing clone of `URL` at `top`, with HEAD moving from aaa to bbb.
    fn existing_clone(top: String, dirty: bool, pull_ok: bool, recovery_ok: bool) -> impl Fn(&str) -> Result<String, GitError> + Send + 'static {
        let head_calls = AtomicUsize::new(0);
        move |line: &str| match line {
            "rev-parse --is-inside-work-tree" => Ok("true\n".to_string()),
            "rev-parse --show-toplevel" => Ok(format!("{}\n", top)),
            "remote get-url origin" => Ok("git@github.com:acme/widgets.git\n".to_string()),
            "rev-parse HEAD" => {
                let head = if head_calls.fetch_add(1, Ordering::SeqCst) == 0 { "aaa" } else { "bbb" };
                Ok(format!("{}\n", head))
            }
            "status --porcelain" => Ok(if dirty { " M src/app.js\n".to_string() } else { String::new() }),
            "rev-parse --abbrev-ref HEAD" => Ok("main\n".to_string()),
            "rev-parse --abbrev-ref --symbolic-full-name main@{upstream}" => Ok("origin/main\n".to_string()),
            "rev-parse -q --verify MERGE_HEAD" => Err(failure("rev-parse")),
            "pull" if !pull_ok => Err(failure("pull")),
            l if l.starts_with("merge --no-edit") && !recovery_ok => Err(failure("merge")),
            _ => Ok(String::new()),
        }
    }

    fn synchronizer(git: Arc<MockGitRunner>, presenter: Arc<RecordingPresenter>) -> RepositorySynchronizer {
        let config = SyncConfig { write_diff_reports: false, ..SyncConfig::default() };
        RepositorySynchronizer::new(git, config, presenter)
    }

    fn position(calls: &[String], prefix: &str) -> usize {
        calls
            .iter()
            .position(|c| c.starts_with(prefix))
            .unwrap_or_else(|| panic!("no call starting with '{}' in {:?}", prefix, calls))
    }

    #[test]
    fn accepts_supported_hosts_and_suffixes() {
        let url = RepositorySynchronizer::validate_url("https://gitlab.com/group/sub/project.git/").unwrap();
        assert_eq!(url.host, "gitlab.com");
        assert_eq!(url.owner, "group/sub");
        assert_eq!(url.name, "project");
        assert_eq!(
            RepositorySynchronizer::local_path_for(&url, Path::new("/clones")),
            PathBuf::from("/clones/project")
        );
    }

    #[test]
    fn rejects_other_schemes_hosts_and_short_paths() {
        for bad in [
            "http://github.com/acme/widgets",
            "git@github.com:acme/widgets.git",
            "https://bitbucket.org/acme/widgets",
            "https://github.com/acme",
            "https://github.com//widgets",
        ] {
            match RepositorySynchronizer::validate_url(bad) {
                Err(RepolyzerError::ValidationError { .. }) => {}
                other => panic!("{} should be rejected, got {:?}", bad, other),
            }
        }
    }

    #[tokio::test]
    async fn clones_missing_working_copy() {
        let root = TempDir::new().unwrap();
        let (git, calls) = scripted(|line| match line {
            "rev-parse HEAD" => Ok("c0ffee\n".to_string()),
            _ => Ok(String::new()),
        });
        let presenter = Arc::new(RecordingPresenter::default());
        let outcome = synchronizer(git, presenter.clone())
            .sync(URL, root.path(), &WorkspaceContext::default())
            .await
            .unwrap();

        assert!(outcome.cloned);
        assert!(!outcome.head_changed);
        assert_eq!(outcome.previous_head, None);
        assert_eq!(outcome.current_head, "c0ffee");
        let expected_clone = format!("clone {} {}", URL, root.path().join("widgets").display());
        assert_eq!(calls.lock().unwrap()[0], expected_clone);
        assert!(presenter.diffs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clone_failure_is_a_repository_error() {
        let root = TempDir::new().unwrap();
        let (git, _) = scripted(|line| {
            if line.starts_with("clone") {
                Err(GitError::CommandFailed {
                    command: "clone".to_string(),
                    status: Some(128),
                    stderr: "fatal: repository not found".to_string(),
                })
            } else {
                Ok(String::new())
            }
        });
        let result = synchronizer(git, Arc::new(RecordingPresenter::default()))
            .sync(URL, root.path(), &WorkspaceContext::default())
            .await;
        match result {
            Err(RepolyzerError::RepositoryError { operation, reason, .. }) => {
                assert_eq!(operation, "clone");
                assert!(reason.contains("repository not found"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn foreign_directory_is_rejected() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("widgets")).unwrap();
        let (git, calls) = scripted(|line| match line {
            "rev-parse --is-inside-work-tree" => Err(failure("rev-parse")),
            _ => Ok(String::new()),
        });
        let synchronizer = synchronizer(git, Arc::new(RecordingPresenter::default()));
        let result = tokio_test::block_on(synchronizer.sync(URL, root.path(), &WorkspaceContext::default()));

        assert!(matches!(result, Err(RepolyzerError::ValidationError { .. })));
        assert!(calls.lock().unwrap().iter().all(|c| !c.starts_with("clone")));
    }

    #[tokio::test]
    async fn failed_pull_recovers_with_branch_reset_merge() {
        let root = TempDir::new().unwrap();
        let local = root.path().join("widgets");
        std::fs::create_dir_all(&local).unwrap();
        let top = canonical_or_self(&local).display().to_string();

        let (git, calls) = scripted(existing_clone(top, true, false, true));
        let presenter = Arc::new(RecordingPresenter::default());
        let outcome = synchronizer(git, presenter.clone())
            .sync(URL, root.path(), &WorkspaceContext::default())
            .await
            .unwrap();

        assert!(outcome.head_changed);
        assert_eq!(outcome.previous_head.as_deref(), Some("aaa"));
        assert_eq!(outcome.current_head, "bbb");

        let calls = calls.lock().unwrap().clone();
        let order = [
            position(&calls, "stash push --include-untracked"),
            position(&calls, "fetch --all --tags"),
            position(&calls, "pull"),
            position(&calls, "checkout -b repolyzer-recovery-"),
            position(&calls, "reset --hard origin/main"),
            position(&calls, "checkout main"),
            position(&calls, "merge --no-edit repolyzer-recovery-"),
            position(&calls, "branch -D repolyzer-recovery-"),
            position(&calls, "stash pop"),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "unexpected order: {:?}", calls);

        let diffs = presenter.diffs.lock().unwrap();
        assert_eq!(diffs.as_slice(), &[("aaa".to_string(), "bbb".to_string(), None)]);
    }

    #[tokio::test]
    async fn exhausted_chain_aborts_and_still_pops_stash() {
        let root = TempDir::new().unwrap();
        let local = root.path().join("widgets");
        std::fs::create_dir_all(&local).unwrap();
        let top = canonical_or_self(&local).display().to_string();

        let (git, calls) = scripted(existing_clone(top, true, false, false));
        let result = synchronizer(git, Arc::new(RecordingPresenter::default()))
            .sync(URL, root.path(), &WorkspaceContext::default())
            .await;

        match result {
            Err(RepolyzerError::MergeConflict { branch, reason, .. }) => {
                assert_eq!(branch, "main");
                assert!(reason.contains("manual resolution required"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let calls = calls.lock().unwrap();
        assert!(calls.iter().any(|c| c == "merge --abort"));
        assert_eq!(calls.last().map(String::as_str), Some("stash pop"));
    }

    #[tokio::test]
    async fn failed_stash_pop_does_not_fail_the_sync() {
        let root = TempDir::new().unwrap();
        let local = root.path().join("widgets");
        std::fs::create_dir_all(&local).unwrap();
        let top = canonical_or_self(&local).display().to_string();

        let answers = existing_clone(top, true, true, true);
        let (git, calls) = scripted(move |line| match line {
            "stash pop" => Err(failure("stash pop")),
            other => answers(other),
        });
        let outcome = synchronizer(git, Arc::new(RecordingPresenter::default()))
            .sync(URL, root.path(), &WorkspaceContext::default())
            .await
            .unwrap();

        assert!(outcome.head_changed);
        assert_eq!(outcome.current_head, "bbb");
        assert!(calls.lock().unwrap().iter().any(|c| c == "stash pop"));
    }

    #[tokio::test]
    async fn unstashed_changes_skip_reset_recovery() {
        let root = TempDir::new().unwrap();
        let local = root.path().join("widgets");
        std::fs::create_dir_all(&local).unwrap();
        let top = canonical_or_self(&local).display().to_string();

        let (git, calls) = scripted(existing_clone(top, true, false, true));
        let config = SyncConfig { auto_stash: false, write_diff_reports: false, ..SyncConfig::default() };
        let result = RepositorySynchronizer::new(git, config, Arc::new(RecordingPresenter::default()))
            .sync(URL, root.path(), &WorkspaceContext::default())
            .await;

        assert!(matches!(result, Err(RepolyzerError::MergeConflict { .. })), "unexpected result: {:?}", result);
        let calls = calls.lock().unwrap();
        assert!(calls.iter().any(|c| c == "pull"));
        assert!(calls.iter().any(|c| c == "merge --abort"));
        for forbidden in ["stash", "checkout -b", "reset --hard", "merge --no-edit"] {
            assert!(calls.iter().all(|c| !c.starts_with(forbidden)), "{} ran: {:?}", forbidden, calls);
        }
    }

    #[tokio::test]
    async fn switch_mode_signals_workspace_change() {
        let root = TempDir::new().unwrap();
        let local = root.path().join("widgets");
        std::fs::create_dir_all(&local).unwrap();
        let top = canonical_or_self(&local).display().to_string();

        let (git, calls) = scripted(existing_clone(top, false, true, true));
        let presenter = Arc::new(RecordingPresenter::default());
        let synchronizer = synchronizer(git, presenter.clone());
        let workspace = WorkspaceContext::new(Some(PathBuf::from("/somewhere/else")), WorkspaceMode::Switch);

        let path = match synchronizer.sync(URL, root.path(), &workspace).await {
            Err(RepolyzerError::WorkspaceSwitched { path }) => path,
            other => panic!("unexpected result: {:?}", other),
        };
        assert_eq!(PathBuf::from(&path), local);
        assert!(calls.lock().unwrap().is_empty(), "no git command may run before switching");

        let switched = WorkspaceContext::new(Some(PathBuf::from(path)), WorkspaceMode::Switch);
        let outcome = synchronizer.sync(URL, root.path(), &switched).await.unwrap();
        assert!(outcome.head_changed);
        assert_eq!(outcome.previous_head.as_deref(), Some("aaa"));
        assert_eq!(outcome.current_head, "bbb");
        assert_eq!(presenter.diffs.lock().unwrap().len(), 1);
    }
}
