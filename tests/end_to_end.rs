use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};
use repolyzer::enums::analysis_mode::AnalysisMode;
use repolyzer::enums::change_type::ChangeType;
use repolyzer::services::git_cli::GitCli;
use repolyzer::services::repository_analyzer::RepositoryAnalyzer;
use repolyzer::services::repository_synchronizer::RepositorySynchronizer;
use repolyzer::structs::config::config::Config;
use repolyzer::structs::config::sync_config::SyncConfig;
use repolyzer::structs::repository_url::RepositoryUrl;
use repolyzer::traits::diff_presenter::DiffPresenter;
use repolyzer::ui::report_renderer::ReportRenderer;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingPresenter {
    diffs: Mutex<Vec<(String, String)>>,
}

impl DiffPresenter for RecordingPresenter {
    fn present_diff(&self, previous: &str, current: &str, _report_path: Option<&Path>) {
        self.diffs.lock().unwrap().push((previous.to_string(), current.to_string()));
    }

    fn present_report(&self, _report_path: &Path) {}
}

fn git(cwd: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

fn commit_all(cwd: &Path, message: &str) {
    git(cwd, &["add", "-A"]);
    git(cwd, &["-c", "commit.gpgsign=false", "commit", "-q", "-m", message]);
}

#[tokio::test]
async fn pull_with_new_commit_shows_up_in_recent_changes() {
    if !GitCli::new().is_available().await {
        eprintln!("git is not installed, skipping");
        return;
    }

    let scratch = TempDir::new().unwrap();
    let origin = scratch.path().join("origin");
    fs::create_dir_all(&origin).unwrap();
    git(&origin, &["init", "-q"]);
    fs::write(origin.join("app.js"), "const a = 1;\n").unwrap();
    fs::write(origin.join("README.md"), "# demo\n").unwrap();
    commit_all(&origin, "initial");

    let remote = RepositoryUrl {
        url: origin.display().to_string(),
        host: "localhost".to_string(),
        owner: "test".to_string(),
        name: "demo".to_string(),
    };
    let working_copy = scratch.path().join("clones").join("demo");
    let git_cli = Arc::new(GitCli::new());
    let presenter = Arc::new(RecordingPresenter::default());
    let synchronizer = RepositorySynchronizer::new(git_cli.clone(), SyncConfig::default(), presenter.clone());

    let cloned = synchronizer.ensure_working_copy(&remote, &working_copy).await.unwrap();
    assert!(cloned.cloned);
    assert!(!cloned.head_changed);

    fs::write(origin.join("app.js"), "const a = 1;\nconst b = 2;\n").unwrap();
    commit_all(&origin, "add b");

    let updated = synchronizer.ensure_working_copy(&remote, &working_copy).await.unwrap();
    assert!(!updated.cloned);
    assert!(updated.head_changed);
    assert_eq!(updated.previous_head.as_deref(), Some(cloned.current_head.as_str()));
    assert_eq!(presenter.diffs.lock().unwrap().len(), 1);
    let diff_report = updated.diff_report.clone().unwrap();
    assert!(diff_report.starts_with(working_copy.join(".repolyzer").join("diffs")));
    assert!(diff_report.exists());

    let analyzer = RepositoryAnalyzer::new(Arc::new(Config::default()), git_cli, presenter);
    let result = analyzer.analyze_local(&working_copy, AnalysisMode::Auto).await.unwrap();

    assert_eq!(result.recent_changes.len(), 1);
    let change_set = &result.recent_changes[0];
    assert_eq!(change_set.file_path, "app.js");
    assert_eq!(change_set.changes.len(), 1);
    assert_eq!(change_set.changes[0].change_type, ChangeType::Add);
    assert_eq!(change_set.changes[0].line_number, 2);
    assert_eq!(change_set.changes[0].content, "const b = 2;");
    assert_eq!(result.repository_info.modified_files, vec!["app.js".to_string()]);
    assert!(result.files.iter().all(|f| !f.file_path.starts_with(".repolyzer")));

    let html = ReportRenderer::render(&result);
    let recent = &html[html.find("<h2>Recent Changes</h2>").unwrap()..];
    assert!(recent.contains("app.js"));
}
