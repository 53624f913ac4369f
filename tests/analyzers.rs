use std::fs;
use std::path::Path;
use std::sync::Arc;
use repolyzer::enums::analysis_mode::AnalysisMode;
use repolyzer::enums::impact::Impact;
use repolyzer::enums::language_family::LanguageFamily;
use repolyzer::enums::security_issue_type::SecurityIssueType;
use repolyzer::enums::severity::Severity;
use repolyzer::errors::RepolyzerError;
use repolyzer::services::git_cli::GitCli;
use repolyzer::services::optimization_analyzer::OptimizationAnalyzer;
use repolyzer::services::repository_analyzer::RepositoryAnalyzer;
use repolyzer::services::security_analyzer::SecurityAnalyzer;
use repolyzer::structs::config::config::Config;
use repolyzer::structs::config::optimization_config::OptimizationConfig;
use repolyzer::traits::diff_presenter::DiffPresenter;
use tempfile::TempDir;

struct SilentPresenter;

impl DiffPresenter for SilentPresenter {
    fn present_diff(&self, _previous: &str, _current: &str, _report_path: Option<&Path>) {}
    fn present_report(&self, _report_path: &Path) {}
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn analyzer(config: Config) -> RepositoryAnalyzer {
    RepositoryAnalyzer::new(Arc::new(config), Arc::new(GitCli::new()), Arc::new(SilentPresenter))
}

#[test]
fn hardcoded_api_key_is_critical() {
    let issues = SecurityAnalyzer::default().analyze("config.js", "const apiKey = \"abc123\";", LanguageFamily::JavaScript);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Critical);
    assert_eq!(issues[0].issue_type, SecurityIssueType::SecretExposure);
    assert_eq!(issues[0].line, Some(1));
}

#[test]
fn plain_code_has_no_security_findings() {
    let content = "function add(a, b) {\n  return a + b;\n}\n";
    assert!(SecurityAnalyzer::default().analyze("math.js", content, LanguageFamily::JavaScript).is_empty());
}

#[test]
fn nesting_threshold() {
    let analyzer = OptimizationAnalyzer::new(&OptimizationConfig::default());
    let five_levels = "function walk(x) {\n  if (x) {\n    for (;;) {\n      while (x) {\n        if (x) {\n          x = 0;\n        }\n      }\n    }\n  }\n}\n";
    let three_levels = "function walk(x) {\n  if (x) {\n    while (x) {\n      x = 0;\n    }\n  }\n}\n";

    let deep: Vec<_> = analyzer
        .analyze("walk.js", five_levels, LanguageFamily::JavaScript)
        .into_iter()
        .filter(|s| s.rule_id == "excessive-nesting")
        .collect();
    assert_eq!(deep.len(), 1);
    assert_eq!(deep[0].impact, Impact::High);
    assert_eq!(deep[0].line, Some(5));

    assert!(analyzer
        .analyze("walk.js", three_levels, LanguageFamily::JavaScript)
        .iter()
        .all(|s| s.rule_id != "excessive-nesting"));
}

#[tokio::test]
async fn local_tree_analysis_without_git() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/config.js", "const apiKey = \"abc123\";\nmodule.exports = { apiKey };\n");
    write(dir.path(), "src/util.py", "def double(x):\n    return x * 2\n");
    write(dir.path(), "node_modules/dep/index.js", "eval(input);\n");
    write(dir.path(), "README.md", "# demo\n");

    let result = analyzer(Config::default())
        .analyze_local(dir.path(), AnalysisMode::Auto)
        .await
        .unwrap();

    assert_eq!(result.mode, AnalysisMode::Full);
    let paths: Vec<&str> = result.files.iter().map(|f| f.file_path.as_str()).collect();
    assert_eq!(paths, vec!["README.md", "src/config.js", "src/util.py"]);
    assert_eq!(result.count_by_severity(Severity::Critical), 1);
    assert!(result.architecture.is_some());
    assert!(result.recent_changes.is_empty());
    assert!(result.repository_info.last_commit.is_empty());
}

#[tokio::test]
async fn disabled_analyzers_produce_no_findings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.js", "var token = \"abcdef\";\nconsole.log(token);\n");

    let mut config = Config::default();
    config.security.enabled = false;
    config.optimization.enabled = false;
    config.architecture.enabled = false;

    let result = analyzer(config).analyze_local(dir.path(), AnalysisMode::Full).await.unwrap();
    assert_eq!(result.files.len(), 1);
    assert!(!result.files[0].has_findings());
    assert!(result.architecture.is_none());
}

#[tokio::test]
async fn local_analysis_requires_a_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "file.js", "x\n");

    match analyzer(Config::default()).analyze_local(&dir.path().join("file.js"), AnalysisMode::Full).await {
        Err(RepolyzerError::ValidationError { field, .. }) => assert_eq!(field, "path"),
        other => panic!("unexpected result: {:?}", other.map(|r| r.target)),
    }
}
