use std::path::{Path, PathBuf};
use std::sync::Arc;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use crate::enums::analysis_mode::AnalysisMode;
use crate::enums::change_type::ChangeType;
use crate::enums::language_family::{language_for_path, LanguageFamily};
use crate::errors::{ErrorHandler, RepolyzerError, RepolyzerResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::services::architecture_analyzer::ArchitectureAnalyzer;
use crate::services::diff_parser::DiffParser;
use crate::services::git_inspector::GitInspector;
use crate::services::optimization_analyzer::OptimizationAnalyzer;
use crate::services::repo_scanner::RepoScanner;
use crate::services::repository_synchronizer::RepositorySynchronizer;
use crate::services::security_analyzer::SecurityAnalyzer;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::architecture::architecture_report::ArchitectureReport;
use crate::structs::config::config::Config;
use crate::structs::diff::code_difference::CodeDifference;
use crate::structs::file_analysis::FileAnalysis;
use crate::structs::repository_info::RepositoryInfo;
use crate::structs::sync_outcome::SyncOutcome;
use crate::structs::workspace_context::WorkspaceContext;
use crate::traits::diff_presenter::DiffPresenter;
use crate::traits::git_runner::GitRunner;

/// Runs one analysis: optional sync, file discovery, per-file scans,
/// architecture scan and recent-change parsing.
pub struct RepositoryAnalyzer {
    config: Arc<Config>,
    inspector: GitInspector,
    synchronizer: RepositorySynchronizer,
    security: SecurityAnalyzer,
    optimization: OptimizationAnalyzer,
}

impl RepositoryAnalyzer {
    pub fn new(config: Arc<Config>, git: Arc<dyn GitRunner>, presenter: Arc<dyn DiffPresenter>) -> Self {
        Self {
            inspector: GitInspector::new(git.clone()),
            synchronizer: RepositorySynchronizer::new(git, config.sync.clone(), presenter),
            security: SecurityAnalyzer::from_config(&config.security),
            optimization: OptimizationAnalyzer::new(&config.optimization),
            config,
        }
    }

    pub async fn analyze_remote(
        &self,
        url: &str,
        clone_root: &Path,
        workspace: &WorkspaceContext,
        mode: AnalysisMode,
    ) -> RepolyzerResult<AnalysisResult> {
        let mut logger = AnimatedLogger::new(format!("Syncing {}", url));
        logger.start();
        let outcome = match self.synchronizer.sync(url, clone_root, workspace).await {
            Ok(outcome) => {
                logger.stop("Repository synced").await;
                outcome
            }
            Err(e @ RepolyzerError::WorkspaceSwitched { .. }) => {
                logger.stop("Switching workspace").await;
                return Err(e);
            }
            Err(e) => {
                logger.error("Sync did not complete").await;
                return Err(e);
            }
        };

        let local_path = outcome.local_path.clone();
        self.run(url.to_string(), &local_path, mode, Some(outcome)).await
    }

    pub async fn analyze_local(&self, path: &Path, mode: AnalysisMode) -> RepolyzerResult<AnalysisResult> {
        if !path.is_dir() {
            return Err(RepolyzerError::validation_error(
                "path",
                &path.display().to_string(),
                "must be an existing directory",
                None,
            ));
        }
        self.run(path.display().to_string(), path, mode, None).await
    }

    /// `Auto` is incremental only after a sync that moved HEAD from a known commit;
    /// `Incremental` without such a commit falls back to full.
    pub fn resolve_mode(requested: AnalysisMode, sync: Option<&SyncOutcome>) -> AnalysisMode {
        let has_range = sync
            .map(|s| s.head_changed && s.previous_head.is_some())
            .unwrap_or(false);
        match requested {
            AnalysisMode::Full => AnalysisMode::Full,
            AnalysisMode::Auto | AnalysisMode::Incremental if has_range => AnalysisMode::Incremental,
            AnalysisMode::Auto | AnalysisMode::Incremental => AnalysisMode::Full,
        }
    }

    async fn run(&self, target: String, root: &Path, requested: AnalysisMode, sync: Option<SyncOutcome>) -> RepolyzerResult<AnalysisResult> {
        let is_git = self.inspector.is_working_copy(root).await;
        let mode = Self::resolve_mode(requested, sync.as_ref());
        if requested == AnalysisMode::Incremental && mode == AnalysisMode::Full {
            log::info!("ℹ️ No previous commit to compare against, running a full analysis");
        }

        let (mode, files) = self.discover_files(root, mode, sync.as_ref()).await;
        log::info!("🔍 {} analysis of {} file(s) in {}", mode, files.len(), root.display());

        let mut logger = AnimatedLogger::new(format!("Scanning {} files", files.len()));
        logger.start();
        let analyses = self.scan_files(root, files).await;
        logger.stop(&format!("Scanned {} files", analyses.len())).await;

        let architecture = self.architecture(root).await;
        let (repository_info, recent_changes) = if is_git {
            (self.inspector.repository_info(root).await, self.recent_changes(root).await)
        } else {
            log::info!("ℹ️ {} is not a git working copy, skipping repository info", root.display());
            (RepositoryInfo::default(), Vec::new())
        };

        Ok(AnalysisResult {
            target,
            repository_info,
            mode,
            files: analyses,
            architecture,
            recent_changes,
            sync,
            generated_at: Utc::now(),
        })
    }

    async fn discover_files(&self, root: &Path, mode: AnalysisMode, sync: Option<&SyncOutcome>) -> (AnalysisMode, Vec<String>) {
        let scanner = RepoScanner::new(root, &self.config.analysis);

        if mode == AnalysisMode::Incremental {
            if let Some((previous, current)) = sync.and_then(|s| s.previous_head.as_deref().map(|p| (p, s.current_head.as_str()))) {
                match self.inspector.changed_files(root, previous, current).await {
                    Ok(changed) => return (AnalysisMode::Incremental, scanner.filter_changed(&changed)),
                    Err(e) => log::warn!("⚠️ Could not list changed files, falling back to full analysis: {}", e),
                }
            }
        }
        (AnalysisMode::Full, scanner.scan_files())
    }

    async fn scan_files(&self, root: &Path, files: Vec<String>) -> Vec<FileAnalysis> {
        let parallel = self.config.analysis.parallel_files.max(1);
        let results: Vec<RepolyzerResult<FileAnalysis>> = stream::iter(files)
            .map(|relative| self.analyze_file(root.join(&relative), relative))
            .buffer_unordered(parallel)
            .collect()
            .await;

        let mut analyses = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => errors.push(e),
            }
        }
        ErrorHandler::handle_multiple_errors(&errors, "file analysis");

        analyses.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        analyses
    }

    async fn analyze_file(&self, absolute: PathBuf, relative: String) -> RepolyzerResult<FileAnalysis> {
        let content = tokio::fs::read_to_string(&absolute)
            .await
            .map_err(|e| RepolyzerError::file_error(&relative, "read", &e.to_string()))?;
        let language = LanguageFamily::from_path(&absolute);

        let (security_issues, optimization_suggestions) = futures::join!(
            async {
                if self.config.security.enabled {
                    self.security.analyze(&relative, &content, language)
                } else {
                    Vec::new()
                }
            },
            async {
                if self.config.optimization.enabled {
                    self.optimization.analyze(&relative, &content, language)
                } else {
                    Vec::new()
                }
            }
        );

        Ok(FileAnalysis {
            language,
            line_count: content.lines().count(),
            file_path: relative,
            security_issues,
            optimization_suggestions,
        })
    }

    async fn architecture(&self, root: &Path) -> Option<ArchitectureReport> {
        if !self.config.architecture.enabled {
            return None;
        }
        let max_file_size = self.config.analysis.max_file_size;
        let root = root.to_path_buf();
        let joined = tokio::task::spawn_blocking(move || ArchitectureAnalyzer::new(max_file_size).analyze(&root)).await;

        match joined {
            Ok(Ok(report)) => Some(report),
            Ok(Err(e)) => {
                ErrorHandler::handle_error(&e);
                None
            }
            Err(e) => {
                ErrorHandler::handle_error(&RepolyzerError::system_error("architecture analysis", &e.to_string()));
                None
            }
        }
    }

    /// The latest commit's diff, with added lines annotated by the security rules.
    async fn recent_changes(&self, root: &Path) -> Vec<CodeDifference> {
        let diff_text = match self.inspector.latest_change(root).await {
            Ok(diff_text) => diff_text,
            Err(e) => {
                log::warn!("⚠️ Could not read the latest change: {}", e);
                return Vec::new();
            }
        };

        let mut differences = DiffParser::parse(&diff_text);
        for difference in &mut differences {
            let language = LanguageFamily::from_language(language_for_path(Path::new(&difference.file_path)));
            for change in difference.changes.iter_mut().filter(|c| c.change_type == ChangeType::Add) {
                change.suggestion = self.security.suggestion_for_line(&change.content, language);
            }
        }
        differences
    }
}
