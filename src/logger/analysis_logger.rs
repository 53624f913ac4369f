use crate::enums::change_type::ChangeType;
use crate::enums::severity::Severity;
use crate::helpers::git_helper::short_hash;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::diff::code_difference::CodeDifference;
use crate::structs::diff::diff_statistics::DiffStatistics;

/// Terminal rendering of analysis results and parsed diffs.
pub struct AnalysisLogger;

impl AnalysisLogger {
    pub fn print_summary(result: &AnalysisResult) {
        println!("\n🔍 REPOSITORY ANALYSIS: {}", result.target);
        println!("======================");

        let info = &result.repository_info;
        if !info.last_commit.is_empty() {
            println!("🌿 Branch {} at {}", info.current_branch, short_hash(&info.last_commit));
        }
        if let Some(sync) = &result.sync {
            if sync.cloned {
                println!("📥 Fresh clone at {}", sync.local_path.display());
            } else if let (Some(previous), true) = (&sync.previous_head, sync.head_changed) {
                println!("🆕 Updated {} -> {}", short_hash(previous), short_hash(&sync.current_head));
            }
        }
        println!("🧭 Mode: {} ({} files)", result.mode, result.files.len());

        println!("\n🔒 SECURITY ISSUES ({} total):", result.security_issue_count());
        for severity in [Severity::Critical, Severity::High, Severity::Medium, Severity::Low] {
            let count = result.count_by_severity(severity);
            if count > 0 {
                println!("  {} {}: {}", severity.emoji(), severity.as_str().to_uppercase(), count);
            }
        }
        Self::print_top_security_issues(result);

        println!("\n⚡ OPTIMIZATION SUGGESTIONS ({} total)", result.optimization_count());

        if let Some(architecture) = &result.architecture {
            println!("\n🏛️ ARCHITECTURE: {}", architecture.organization.label());
            for pattern in &architecture.patterns {
                println!("  🧩 {} ({:.0}%)", pattern.pattern_type.label(), pattern.confidence * 100.0);
            }
            for module in &architecture.circular_dependencies {
                println!("  🔁 Circular: {}", module);
            }
            println!("  💡 {} suggestion(s)", architecture.suggestions.len());
        }

        if !result.recent_changes.is_empty() {
            let statistics = DiffStatistics::from_differences(&result.recent_changes);
            println!(
                "\n📝 RECENT CHANGES: {} file(s), +{} -{}",
                statistics.files_changed, statistics.additions, statistics.removals
            );
        }
    }

    fn print_top_security_issues(result: &AnalysisResult) {
        let mut issues: Vec<_> = result.files.iter().flat_map(|f| f.security_issues.iter()).collect();
        issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        for issue in issues.iter().take(10) {
            println!(
                "  {} {}:{} [{}]: {}",
                issue.severity.emoji(),
                issue.file_path,
                issue.line.unwrap_or(0),
                issue.severity,
                issue.message
            );
            println!("      💡 {}", issue.suggestion);
        }
        if issues.len() > 10 {
            println!("  ... and {} more in the HTML report", issues.len() - 10);
        }
    }

    pub fn print_differences(differences: &[CodeDifference]) {
        for difference in differences {
            println!("\n📄 {}", difference.file_path);
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for change in &difference.changes {
                match change.change_type {
                    ChangeType::Add => println!("\x1b[32m+ {:<4} | {}\x1b[0m", change.line_number, change.content),
                    ChangeType::Remove => println!("\x1b[31m- {:<4} | {}\x1b[0m", change.line_number, change.content),
                    ChangeType::Modify => println!("  {:<4} | {}", change.line_number, change.content),
                }
                if let Some(suggestion) = &change.suggestion {
                    println!("       {}", suggestion);
                }
            }
        }
        let statistics = DiffStatistics::from_differences(differences);
        println!(
            "\n📊 {} file(s) changed, {} addition(s), {} removal(s)",
            statistics.files_changed, statistics.additions, statistics.removals
        );
    }
}
