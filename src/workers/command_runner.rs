use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use chrono::{DateTime, Utc};
use tokio::io::AsyncReadExt;
use crate::config::config_manager::ConfigManager;
use crate::enums::analysis_mode::AnalysisMode;
use crate::enums::commands::Commands;
use crate::enums::workspace_mode::WorkspaceMode;
use crate::errors::{ErrorHandler, RepolyzerError, RepolyzerResult, ResultExt};
use crate::helpers::html_helper::css_class;
use crate::logger::analysis_logger::AnalysisLogger;
use crate::logger::animated_logger::AnimatedLogger;
use crate::services::diff_parser::DiffParser;
use crate::services::git_cli::GitCli;
use crate::services::repository_analyzer::RepositoryAnalyzer;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::config::config::Config;
use crate::structs::workspace_context::WorkspaceContext;
use crate::traits::diff_presenter::DiffPresenter;
use crate::ui::report_renderer::ReportRenderer;
use crate::ui::report_server::ReportServer;
use crate::ui::report_store::ReportStore;
use crate::ui::terminal_presenter::TerminalPresenter;

pub struct CommandRunner {
    current_dir: PathBuf,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new(current_dir: PathBuf) -> Self {
        Self {
            current_dir,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> RepolyzerResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Validate => self.validate_command().await,
            Commands::Analyze { url, clone_dir, full, incremental, workspace, switch_workspace, open, output } => {
                let mode = if full {
                    Some(AnalysisMode::Full)
                } else if incremental {
                    Some(AnalysisMode::Incremental)
                } else {
                    None
                };
                self.analyze_command(url, clone_dir, mode, workspace, switch_workspace, open, output).await
            }
            Commands::Scan { path, open, output } => self.scan_command(path, open, output).await,
            Commands::Diff { input } => self.diff_command(input).await,
            Commands::Serve { reports, port } => self.serve_command(reports, port).await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> RepolyzerResult<()> {
        log::info!("🚀 Initializing repolyzer configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Set sync.clone_root to skip the clone directory prompt.");
                log::info!("🔧 Run 'repolyzer validate' to check your configuration.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn validate_command(&self) -> RepolyzerResult<()> {
        log::info!("🔍 Validating configuration at {}", ConfigManager::config_path().display());

        let config = ConfigManager::load()?;
        let validation = ConfigManager::validate_config(&config);
        validation.print_summary();

        if !validation.is_valid {
            return Err(RepolyzerError::config_error(
                &format!("{} configuration error(s)", validation.errors.len()),
                None,
                Some("Fix the errors listed above"),
            ));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn analyze_command(
        &self,
        url: String,
        clone_dir: Option<PathBuf>,
        mode: Option<AnalysisMode>,
        workspace: Option<PathBuf>,
        switch_workspace: bool,
        open: bool,
        output: Option<PathBuf>,
    ) -> RepolyzerResult<()> {
        log::info!("🔍 Starting analysis of {}", url);

        let config = Self::load_config()?;
        let clone_root = match clone_dir.or_else(|| config.sync.clone_root.as_ref().map(PathBuf::from)) {
            Some(clone_root) => clone_root,
            None => Self::prompt_clone_dir()?,
        };
        tokio::fs::create_dir_all(&clone_root).await.with_operation("create clone directory")?;

        let mode = mode.unwrap_or(config.analysis.mode);
        let workspace_mode = if switch_workspace { WorkspaceMode::Switch } else { config.sync.workspace_mode };
        let workspace = WorkspaceContext::new(Some(workspace.unwrap_or_else(|| self.current_dir.clone())), workspace_mode);

        let git = Self::git().await?;
        let presenter = Arc::new(TerminalPresenter::new(open || config.output.open_in_browser));
        let config = Arc::new(config);
        let analyzer = RepositoryAnalyzer::new(Arc::clone(&config), git, presenter.clone());

        let result = Self::cancellable("analysis", async {
            match analyzer.analyze_remote(&url, &clone_root, &workspace, mode).await {
                Err(RepolyzerError::WorkspaceSwitched { path }) => {
                    log::info!("🔁 Re-running from workspace {}", path);
                    let switched = WorkspaceContext::new(Some(PathBuf::from(path)), WorkspaceMode::Switch);
                    analyzer.analyze_remote(&url, &clone_root, &switched, mode).await
                }
                other => other,
            }
        })
        .await?;

        self.finish(&result, &config, presenter.as_ref(), output).await
    }

    async fn scan_command(&self, path: PathBuf, open: bool, output: Option<PathBuf>) -> RepolyzerResult<()> {
        log::info!("🔍 Scanning {}", path.display());

        let config = Self::load_config()?;
        let git = Self::git().await?;
        let presenter = Arc::new(TerminalPresenter::new(open || config.output.open_in_browser));
        let mode = config.analysis.mode;
        let config = Arc::new(config);
        let analyzer = RepositoryAnalyzer::new(Arc::clone(&config), git, presenter.clone());

        let result = Self::cancellable("scan", analyzer.analyze_local(&path, mode)).await?;
        self.finish(&result, &config, presenter.as_ref(), output).await
    }

    async fn diff_command(&self, input: String) -> RepolyzerResult<()> {
        let diff_text = if input == "-" {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .map_err(|e| RepolyzerError::file_error("<stdin>", "read", &e.to_string()))?;
            buffer
        } else {
            tokio::fs::read_to_string(&input)
                .await
                .map_err(|e| RepolyzerError::file_error(&input, "read", &e.to_string()))?
        };

        let differences = DiffParser::parse(&diff_text);
        if differences.is_empty() {
            log::info!("ℹ️ No file changes found in the input");
            return Ok(());
        }
        AnalysisLogger::print_differences(&differences);
        Ok(())
    }

    async fn serve_command(&self, reports: Vec<PathBuf>, port: Option<u16>) -> RepolyzerResult<()> {
        let config = Self::load_config()?;
        let sources = if reports.is_empty() { vec![ConfigManager::report_dir(&config)] } else { reports };

        let store = Arc::new(ReportStore::new());
        Self::load_reports(&store, &Self::report_files(&sources).await?).await?;

        if store.is_empty() {
            return Err(RepolyzerError::validation_error(
                "reports",
                &sources.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
                "must contain at least one .html report",
                Some("Run 'repolyzer analyze' or 'repolyzer scan' first"),
            ));
        }

        let mut server = ReportServer::new(Arc::clone(&store));
        server.start(port.unwrap_or(config.output.server_port)).await?;
        if let Some(url) = server.url() {
            log::info!("🌐 Serving {} report(s) at {}", store.len(), url);
            if config.output.open_in_browser {
                if let Err(e) = webbrowser::open(&url) {
                    log::warn!("⚠️ Could not open the browser: {}", e);
                }
            }
        }
        log::info!("💡 Press Ctrl+C to stop");

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| RepolyzerError::system_error("wait for Ctrl+C", &e.to_string()))?;
        server.shutdown().await
    }

    /// Unreadable files are skipped; it only fails when none could be loaded.
    async fn load_reports(store: &ReportStore, files: &[PathBuf]) -> RepolyzerResult<()> {
        let mut errors = Vec::new();
        for file in files {
            match tokio::fs::read_to_string(file).await {
                Ok(html) => {
                    let title = file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
                    let id = store.insert(title, html);
                    log::info!("📄 {} -> /reports/{}", file.display(), id);
                }
                Err(e) => errors.push(RepolyzerError::file_error(&file.display().to_string(), "read", &e.to_string())),
            }
        }

        if store.is_empty() && !errors.is_empty() {
            return Err(RepolyzerError::MultipleErrors {
                errors,
                context: "load reports".to_string(),
            });
        }
        ErrorHandler::handle_multiple_errors(&errors, "load reports");
        Ok(())
    }

    /// Expands directories into their `.html` files, sorted by name.
    async fn report_files(sources: &[PathBuf]) -> RepolyzerResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for source in sources {
            if source.is_dir() {
                let mut entries = tokio::fs::read_dir(source).await.with_operation("list reports")?;
                let mut found = Vec::new();
                while let Some(entry) = entries.next_entry().await.with_operation("list reports")? {
                    let path = entry.path();
                    if path.extension().map(|e| e == "html").unwrap_or(false) {
                        found.push(path);
                    }
                }
                found.sort();
                files.extend(found);
            } else if source.is_file() {
                files.push(source.clone());
            } else {
                log::warn!("⚠️ Skipping {}: not found", source.display());
            }
        }
        Ok(files)
    }

    async fn finish(
        &self,
        result: &AnalysisResult,
        config: &Config,
        presenter: &dyn DiffPresenter,
        output: Option<PathBuf>,
    ) -> RepolyzerResult<()> {
        AnalysisLogger::print_summary(result);

        let mut logger = AnimatedLogger::new("Rendering report");
        logger.start();
        let path = output.unwrap_or_else(|| {
            ConfigManager::report_dir(config).join(Self::report_file_name(&result.target, result.generated_at))
        });
        match Self::write_report(&path, &ReportRenderer::render(result)).await {
            Ok(()) => logger.stop("Report rendered").await,
            Err(e) => {
                logger.error("Report was not written").await;
                return Err(e);
            }
        }

        presenter.present_report(&path);
        Ok(())
    }

    async fn write_report(path: &Path, html: &str) -> RepolyzerResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepolyzerError::file_error(&parent.display().to_string(), "create directory", &e.to_string()))?;
        }
        tokio::fs::write(path, html)
            .await
            .map_err(|e| RepolyzerError::file_error(&path.display().to_string(), "write", &e.to_string()))
    }

    fn report_file_name(target: &str, at: DateTime<Utc>) -> String {
        let name = target
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .trim_end_matches(".git");
        let name = if name.is_empty() { "repository".to_string() } else { css_class(name) };
        format!("report_{}_{}.html", name, at.format("%Y%m%d_%H%M%S"))
    }

    fn load_config() -> RepolyzerResult<Config> {
        let config = match ConfigManager::load() {
            Ok(config) => config,
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'repolyzer init' to create a configuration file.");
                return Err(e);
            }
        };
        ConfigManager::ensure_valid(&config)?;
        Ok(config)
    }

    async fn git() -> RepolyzerResult<Arc<GitCli>> {
        let git = GitCli::new();
        if !git.is_available().await {
            return Err(RepolyzerError::system_error("locate git", "the git binary was not found on PATH"));
        }
        Ok(Arc::new(git))
    }

    async fn cancellable<T>(operation: &str, future: impl Future<Output = RepolyzerResult<T>>) -> RepolyzerResult<T> {
        tokio::select! {
            result = future => result,
            _ = tokio::signal::ctrl_c() => {
                log::warn!("🛑 Interrupted, stopping {}", operation);
                Err(RepolyzerError::cancelled(operation))
            }
        }
    }

    fn prompt_clone_dir() -> RepolyzerResult<PathBuf> {
        let default = ConfigManager::default_clone_root();
        print!("\n📁 Clone directory [{}] (q to cancel): ", default.display());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Self::parse_clone_dir_answer(&input, default)
    }

    fn parse_clone_dir_answer(answer: &str, default: PathBuf) -> RepolyzerResult<PathBuf> {
        match answer.trim() {
            "" => Ok(default),
            "q" | "Q" => Err(RepolyzerError::cancelled("clone directory selection")),
            other => Ok(PathBuf::from(other)),
        }
    }
}
