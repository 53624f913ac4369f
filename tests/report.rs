use std::path::PathBuf;
use chrono::Utc;
use repolyzer::enums::analysis_mode::AnalysisMode;
use repolyzer::enums::change_type::ChangeType;
use repolyzer::enums::impact::Impact;
use repolyzer::enums::language_family::LanguageFamily;
use repolyzer::enums::optimization_type::OptimizationType;
use repolyzer::enums::organization_style::OrganizationStyle;
use repolyzer::structs::analysis_result::AnalysisResult;
use repolyzer::structs::architecture::architecture_report::ArchitectureReport;
use repolyzer::structs::diff::change::Change;
use repolyzer::structs::diff::code_difference::CodeDifference;
use repolyzer::structs::file_analysis::FileAnalysis;
use repolyzer::structs::optimization_suggestion::OptimizationSuggestion;
use repolyzer::structs::repository_info::RepositoryInfo;
use repolyzer::structs::sync_outcome::SyncOutcome;
use repolyzer::ui::report_renderer::ReportRenderer;

fn sample() -> AnalysisResult {
    AnalysisResult {
        target: "https://github.com/acme/shop".to_string(),
        repository_info: RepositoryInfo {
            current_branch: "main".to_string(),
            last_commit: "0123456789abcdef".to_string(),
            modified_files: vec!["src/cart.js".to_string()],
            branches: vec!["main".to_string(), "origin/main".to_string()],
            remote_url: Some("https://github.com/acme/shop.git".to_string()),
        },
        mode: AnalysisMode::Incremental,
        files: vec![FileAnalysis {
            file_path: "src/cart.js".to_string(),
            language: LanguageFamily::JavaScript,
            line_count: 3,
            security_issues: Vec::new(),
            optimization_suggestions: vec![OptimizationSuggestion {
                suggestion_type: OptimizationType::Style,
                impact: Impact::Low,
                message: "Debug logging left in code".to_string(),
                file_path: "src/cart.js".to_string(),
                line: Some(2),
                column: Some(1),
                suggestion: "Remove console.log".to_string(),
                rule_id: "console-log".to_string(),
            }],
        }],
        architecture: Some(ArchitectureReport {
            organization: OrganizationStyle::Flat,
            patterns: Vec::new(),
            suggestions: Vec::new(),
            dependencies: Vec::new(),
            circular_dependencies: vec!["src/a.js".to_string()],
            present_layers: Vec::new(),
        }),
        recent_changes: vec![CodeDifference {
            file_path: "src/cart.js".to_string(),
            changes: vec![Change {
                change_type: ChangeType::Add,
                line_number: 2,
                content: "console.log(items.length < 3);".to_string(),
                suggestion: None,
            }],
        }],
        sync: Some(SyncOutcome {
            local_path: PathBuf::from("/work/shop"),
            previous_head: Some("fedcba9876543210".to_string()),
            current_head: "0123456789abcdef".to_string(),
            head_changed: true,
            cloned: false,
            diff_report: None,
        }),
        generated_at: Utc::now(),
    }
}

#[test]
fn report_carries_repository_and_findings() {
    let html = ReportRenderer::render(&sample());

    assert!(html.contains("fedcba9 → 0123456"));
    assert!(html.contains("Debug logging left in code"));
    assert!(html.contains("No security issues found."));
    assert!(html.contains("Flat"));
    assert!(html.contains("<code>src/a.js</code>"));
    assert!(html.contains("console.log(items.length &lt; 3);"));
    assert!(html.contains("incremental analysis"));
}

#[test]
fn sections_appear_in_order() {
    let html = ReportRenderer::render(&sample());
    let positions: Vec<usize> = ["Repository Info", "Summary", "Security Findings", "Optimization Findings", "Architecture", "Recent Changes"]
        .iter()
        .map(|heading| html.find(&format!("<h2>{}</h2>", heading)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}
