use std::cmp::Reverse;
use crate::enums::change_type::ChangeType;
use crate::helpers::git_helper::short_hash;
use crate::helpers::html_helper::{css_class, escape_html};
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::architecture::architecture_report::ArchitectureReport;
use crate::structs::diff::diff_statistics::DiffStatistics;
use crate::structs::file_analysis::FileAnalysis;
use crate::enums::severity::Severity;

const REPORT_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; background: #f6f8fa; color: #24292f; }
header { background: #24292f; color: #fff; padding: 24px 32px; }
header h1 { margin: 0 0 4px 0; font-size: 24px; }
header p { margin: 0; color: #c9d1d9; }
main { padding: 24px 32px; max-width: 1200px; }
section { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; margin-bottom: 24px; padding: 16px 24px; }
h2 { margin-top: 0; border-bottom: 1px solid #d8dee4; padding-bottom: 8px; }
h3 { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 14px; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #eaeef2; vertical-align: top; }
code, pre { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 13px; }
.cards { display: flex; gap: 16px; flex-wrap: wrap; }
.card { flex: 1; min-width: 140px; border: 1px solid #d0d7de; border-radius: 6px; padding: 12px; text-align: center; }
.card .value { font-size: 28px; font-weight: 600; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 12px; font-size: 12px; font-weight: 600; color: #fff; }
.badge.critical { background: #8b0000; }
.badge.high { background: #cf222e; }
.badge.medium { background: #bf8700; }
.badge.low { background: #57606a; }
.empty { color: #57606a; font-style: italic; }
.diff { background: #f6f8fa; border-radius: 6px; padding: 8px; overflow-x: auto; }
.diff .add { background: #dafbe1; }
.diff .remove { background: #ffebe9; }
.diff .hint { color: #9a6700; display: block; padding-left: 24px; }
"#;

/// Renders an analysis into a single self-contained HTML page.
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(result: &AnalysisResult) -> String {
        let title = format!("Repolyzer report: {}", result.target);
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", REPORT_STYLE));
        html.push_str(&format!(
            "<header><h1>{}</h1><p>Generated {} &middot; {} analysis</p></header>\n<main>\n",
            escape_html(&title),
            result.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            result.mode
        ));

        html.push_str(&Self::repository_section(result));
        html.push_str(&Self::summary_section(result));
        html.push_str(&Self::security_section(&result.files));
        html.push_str(&Self::optimization_section(&result.files));
        html.push_str(&Self::architecture_section(result.architecture.as_ref()));
        html.push_str(&Self::recent_changes_section(result));

        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    fn repository_section(result: &AnalysisResult) -> String {
        let info = &result.repository_info;
        let mut rows = vec![
            ("Target", result.target.clone()),
            ("Branch", info.current_branch.clone()),
            ("Last commit", info.last_commit.clone()),
            ("Remote", info.remote_url.clone().unwrap_or_default()),
            ("Branches", info.branches.join(", ")),
        ];
        if let Some(sync) = &result.sync {
            let head = match &sync.previous_head {
                Some(previous) if sync.head_changed => format!("{} → {}", short_hash(previous), short_hash(&sync.current_head)),
                _ => short_hash(&sync.current_head).to_string(),
            };
            rows.push(("Head", head));
            rows.push(("Working copy", sync.local_path.display().to_string()));
            rows.push(("Freshly cloned", if sync.cloned { "yes" } else { "no" }.to_string()));
        }

        let mut section = String::from("<section id=\"repository-info\">\n<h2>Repository Info</h2>\n<table>\n");
        for (label, value) in rows.into_iter().filter(|(_, value)| !value.is_empty()) {
            section.push_str(&format!("<tr><th>{}</th><td>{}</td></tr>\n", label, escape_html(&value)));
        }
        section.push_str("</table>\n");
        if !info.modified_files.is_empty() {
            section.push_str("<p>Files touched by the latest commit:</p>\n<ul>\n");
            for file in &info.modified_files {
                section.push_str(&format!("<li><code>{}</code></li>\n", escape_html(file)));
            }
            section.push_str("</ul>\n");
        }
        section.push_str("</section>\n");
        section
    }

    fn summary_section(result: &AnalysisResult) -> String {
        let architecture_count = result.architecture.as_ref().map(|a| a.suggestions.len()).unwrap_or(0);
        let cards = [
            ("Files analyzed", result.files.len()),
            ("Security issues", result.security_issue_count()),
            ("Optimizations", result.optimization_count()),
            ("Architecture notes", architecture_count),
        ];

        let mut section = String::from("<section id=\"summary\">\n<h2>Summary</h2>\n<div class=\"cards\">\n");
        for (label, value) in cards {
            section.push_str(&format!(
                "<div class=\"card\"><div class=\"value\">{}</div><div>{}</div></div>\n",
                value, label
            ));
        }
        section.push_str("</div>\n<p>");
        let by_severity: Vec<String> = [Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
            .iter()
            .map(|severity| {
                format!(
                    "<span class=\"badge {}\">{}</span> {}",
                    css_class(severity.as_str()),
                    severity,
                    result.count_by_severity(*severity)
                )
            })
            .collect();
        section.push_str(&by_severity.join(" &nbsp; "));
        section.push_str("</p>\n</section>\n");
        section
    }

    fn security_section(files: &[FileAnalysis]) -> String {
        let mut section = String::from("<section id=\"security\">\n<h2>Security Findings</h2>\n");
        let mut flagged: Vec<&FileAnalysis> = files.iter().filter(|f| !f.security_issues.is_empty()).collect();
        if flagged.is_empty() {
            section.push_str("<p class=\"empty\">No security issues found.</p>\n</section>\n");
            return section;
        }
        flagged.sort_by_key(|f| (Reverse(f.security_issues.iter().map(|i| i.severity).max()), f.file_path.clone()));

        for file in flagged {
            let mut issues: Vec<_> = file.security_issues.iter().collect();
            issues.sort_by_key(|i| (Reverse(i.severity), i.line));

            section.push_str(&format!("<h3>{}</h3>\n<table>\n", escape_html(&file.file_path)));
            section.push_str("<tr><th>Severity</th><th>Line</th><th>Type</th><th>Issue</th><th>Suggestion</th></tr>\n");
            for issue in issues {
                section.push_str(&format!(
                    "<tr><td><span class=\"badge {}\">{}</span></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    css_class(issue.severity.as_str()),
                    issue.severity,
                    Self::location(issue.line, issue.column),
                    issue.issue_type.label(),
                    escape_html(&issue.message),
                    escape_html(&issue.suggestion)
                ));
            }
            section.push_str("</table>\n");
        }
        section.push_str("</section>\n");
        section
    }

    fn optimization_section(files: &[FileAnalysis]) -> String {
        let mut section = String::from("<section id=\"optimization\">\n<h2>Optimization Findings</h2>\n");
        let mut flagged: Vec<&FileAnalysis> = files.iter().filter(|f| !f.optimization_suggestions.is_empty()).collect();
        if flagged.is_empty() {
            section.push_str("<p class=\"empty\">No optimization suggestions.</p>\n</section>\n");
            return section;
        }
        flagged.sort_by_key(|f| (Reverse(f.optimization_suggestions.iter().map(|s| s.impact).max()), f.file_path.clone()));

        for file in flagged {
            let mut suggestions: Vec<_> = file.optimization_suggestions.iter().collect();
            suggestions.sort_by_key(|s| (Reverse(s.impact), s.line));

            section.push_str(&format!("<h3>{}</h3>\n<table>\n", escape_html(&file.file_path)));
            section.push_str("<tr><th>Impact</th><th>Line</th><th>Type</th><th>Finding</th><th>Suggestion</th></tr>\n");
            for suggestion in suggestions {
                section.push_str(&format!(
                    "<tr><td><span class=\"badge {}\">{}</span></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    css_class(suggestion.impact.as_str()),
                    suggestion.impact,
                    Self::location(suggestion.line, suggestion.column),
                    suggestion.suggestion_type.label(),
                    escape_html(&suggestion.message),
                    escape_html(&suggestion.suggestion)
                ));
            }
            section.push_str("</table>\n");
        }
        section.push_str("</section>\n");
        section
    }

    fn architecture_section(report: Option<&ArchitectureReport>) -> String {
        let mut section = String::from("<section id=\"architecture\">\n<h2>Architecture</h2>\n");
        let report = match report {
            Some(report) => report,
            None => {
                section.push_str("<p class=\"empty\">Architecture analysis was not run.</p>\n</section>\n");
                return section;
            }
        };

        section.push_str(&format!("<p>Organization: <strong>{}</strong></p>\n", report.organization.label()));
        if !report.present_layers.is_empty() {
            section.push_str(&format!("<p>Layers present: {}</p>\n", escape_html(&report.present_layers.join(", "))));
        }

        if report.patterns.is_empty() {
            section.push_str("<p class=\"empty\">No architectural pattern detected.</p>\n");
        } else {
            section.push_str("<table>\n<tr><th>Pattern</th><th>Confidence</th><th>Evidence</th></tr>\n");
            for pattern in &report.patterns {
                section.push_str(&format!(
                    "<tr><td>{}</td><td>{:.0}%</td><td><code>{}</code></td></tr>\n",
                    pattern.pattern_type.label(),
                    pattern.confidence * 100.0,
                    escape_html(&pattern.evidence.join(", "))
                ));
            }
            section.push_str("</table>\n");
        }

        if !report.circular_dependencies.is_empty() {
            section.push_str("<h3>Circular dependencies</h3>\n<ul>\n");
            for module in &report.circular_dependencies {
                section.push_str(&format!("<li><code>{}</code></li>\n", escape_html(module)));
            }
            section.push_str("</ul>\n");
        }

        if !report.suggestions.is_empty() {
            let mut suggestions: Vec<_> = report.suggestions.iter().collect();
            suggestions.sort_by_key(|s| Reverse(s.impact));
            section.push_str("<table>\n<tr><th>Impact</th><th>Type</th><th>Finding</th><th>Suggestion</th></tr>\n");
            for suggestion in suggestions {
                section.push_str(&format!(
                    "<tr><td><span class=\"badge {}\">{}</span></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    css_class(suggestion.impact.as_str()),
                    suggestion.impact,
                    suggestion.suggestion_type.label(),
                    escape_html(&suggestion.message),
                    escape_html(&suggestion.suggestion)
                ));
            }
            section.push_str("</table>\n");
        }
        section.push_str("</section>\n");
        section
    }

    fn recent_changes_section(result: &AnalysisResult) -> String {
        let mut section = String::from("<section id=\"recent-changes\">\n<h2>Recent Changes</h2>\n");
        if result.recent_changes.is_empty() {
            section.push_str("<p class=\"empty\">No recent changes.</p>\n</section>\n");
            return section;
        }

        let statistics = DiffStatistics::from_differences(&result.recent_changes);
        section.push_str(&format!(
            "<p>{} file(s) changed, {} addition(s), {} removal(s)</p>\n",
            statistics.files_changed, statistics.additions, statistics.removals
        ));

        for difference in &result.recent_changes {
            section.push_str(&format!(
                "<h3>{} <small>(+{} / -{})</small></h3>\n<pre class=\"diff\">",
                escape_html(&difference.file_path),
                difference.additions(),
                difference.removals()
            ));
            for change in &difference.changes {
                let class = match change.change_type {
                    ChangeType::Add => "add",
                    ChangeType::Remove => "remove",
                    ChangeType::Modify => "context",
                };
                section.push_str(&format!(
                    "<span class=\"{}\">{:>5} {} {}</span>\n",
                    class,
                    change.line_number,
                    change.change_type.symbol(),
                    escape_html(&change.content)
                ));
                if let Some(hint) = &change.suggestion {
                    section.push_str(&format!("<span class=\"hint\">{}</span>\n", escape_html(hint)));
                }
            }
            section.push_str("</pre>\n");
        }
        section.push_str("</section>\n");
        section
    }

    fn location(line: Option<usize>, column: Option<usize>) -> String {
        match (line, column) {
            (Some(line), Some(column)) => format!("{}:{}", line, column),
            (Some(line), None) => line.to_string(),
            _ => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::enums::analysis_mode::AnalysisMode;
    use crate::enums::language_family::LanguageFamily;
    use crate::enums::security_issue_type::SecurityIssueType;
    use crate::structs::repository_info::RepositoryInfo;
    use crate::structs::security_issue::SecurityIssue;

    fn issue(file: &str, severity: Severity, message: &str) -> SecurityIssue {
        SecurityIssue {
            issue_type: SecurityIssueType::UnsafeInput,
            severity,
            message: message.to_string(),
            file_path: file.to_string(),
            line: Some(1),
            column: Some(1),
            suggestion: "fix it".to_string(),
            rule_id: "test".to_string(),
        }
    }

    fn result(files: Vec<FileAnalysis>) -> AnalysisResult {
        AnalysisResult {
            target: "demo".to_string(),
            repository_info: RepositoryInfo::default(),
            mode: AnalysisMode::Full,
            files,
            architecture: None,
            recent_changes: Vec::new(),
            sync: None,
            generated_at: Utc::now(),
        }
    }

    fn file(path: &str, issues: Vec<SecurityIssue>) -> FileAnalysis {
        FileAnalysis {
            file_path: path.to_string(),
            language: LanguageFamily::JavaScript,
            line_count: 1,
            security_issues: issues,
            optimization_suggestions: Vec::new(),
        }
    }

    #[test]
    fn contains_every_section() {
        let html = ReportRenderer::render(&result(Vec::new()));
        for heading in ["Repository Info", "Summary", "Security Findings", "Optimization Findings", "Architecture", "Recent Changes"] {
            assert!(html.contains(&format!("<h2>{}</h2>", heading)), "missing {}", heading);
        }
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn escapes_finding_text() {
        let files = vec![file("src/<x>.js", vec![issue("src/<x>.js", Severity::High, "<script>alert(1)</script>")])];
        let html = ReportRenderer::render(&result(files));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("src/&lt;x&gt;.js"));
    }

    #[test]
    fn orders_files_and_findings_by_severity() {
        let files = vec![
            file("a.js", vec![issue("a.js", Severity::Low, "low finding")]),
            file("b.js", vec![
                issue("b.js", Severity::Medium, "medium finding"),
                issue("b.js", Severity::Critical, "critical finding"),
            ]),
        ];
        let html = ReportRenderer::render(&result(files));
        let b = html.find("<h3>b.js</h3>").unwrap();
        let a = html.find("<h3>a.js</h3>").unwrap();
        assert!(b < a);
        assert!(html.find("critical finding").unwrap() < html.find("medium finding").unwrap());
    }
}
