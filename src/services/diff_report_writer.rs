use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};
use crate::config::constants::{DIFF_REPORT_SUBDIR, WORKSPACE_STATE_DIR};
use crate::errors::{RepolyzerError, RepolyzerResult};
use crate::helpers::git_helper::short_hash;
use crate::services::diff_parser::DiffParser;
use crate::structs::diff::diff_statistics::DiffStatistics;

/// Persists the diff between two commits as a markdown file inside the working copy.
pub struct DiffReportWriter;

impl DiffReportWriter {
    pub fn report_path(working_copy: &Path, previous: &str, current: &str, at: DateTime<Local>) -> PathBuf {
        working_copy
            .join(WORKSPACE_STATE_DIR)
            .join(DIFF_REPORT_SUBDIR)
            .join(format!(
                "diff_{}_{}_{}.md",
                short_hash(previous),
                short_hash(current),
                at.format("%Y%m%d_%H%M%S")
            ))
    }

    pub async fn write(working_copy: &Path, previous: &str, current: &str, diff_text: &str) -> RepolyzerResult<PathBuf> {
        let now = Local::now();
        let path = Self::report_path(working_copy, previous, current, now);
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_else(|| working_copy.to_path_buf());

        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            RepolyzerError::file_error(&directory.display().to_string(), "create diff report directory", &e.to_string())
        })?;
        Self::ensure_excluded(working_copy).await;

        let statistics = DiffStatistics::from_differences(&DiffParser::parse(diff_text));
        let content = Self::render_markdown(previous, current, &statistics, diff_text, now);
        tokio::fs::write(&path, content).await.map_err(|e| {
            RepolyzerError::file_error(&path.display().to_string(), "write diff report", &e.to_string())
        })?;

        log::info!("📝 Diff report written to {}", path.display());
        Ok(path)
    }

    pub fn render_markdown(previous: &str, current: &str, statistics: &DiffStatistics, diff_text: &str, at: DateTime<Local>) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Changes {}..{}\n\n", short_hash(previous), short_hash(current)));
        out.push_str(&format!("- From: `{}`\n", previous));
        out.push_str(&format!("- To: `{}`\n", current));
        out.push_str(&format!("- Generated: {}\n\n", at.format("%Y-%m-%d %H:%M:%S")));
        out.push_str("## Statistics\n\n");
        out.push_str(&format!("- Files changed: {}\n", statistics.files_changed));
        out.push_str(&format!("- Additions: {}\n", statistics.additions));
        out.push_str(&format!("- Removals: {}\n\n", statistics.removals));
        out.push_str("## Diff\n\n```diff\n");
        out.push_str(diff_text);
        if !diff_text.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n");
        out
    }

    /// Keeps the state directory out of `git status` without touching `.gitignore`.
    async fn ensure_excluded(working_copy: &Path) {
        let git_dir = working_copy.join(".git");
        if !git_dir.is_dir() {
            return;
        }
        let info_dir = git_dir.join("info");
        let exclude_path = info_dir.join("exclude");
        let entry = format!("{}/", WORKSPACE_STATE_DIR);

        let existing = tokio::fs::read_to_string(&exclude_path).await.unwrap_or_default();
        if existing.lines().any(|line| line.trim() == entry) {
            return;
        }

        let mut updated = existing;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&entry);
        updated.push('\n');

        let result = async {
            tokio::fs::create_dir_all(&info_dir).await?;
            tokio::fs::write(&exclude_path, updated).await?;
            Ok::<(), std::io::Error>(())
        }
        .await;
        if let Err(e) = result {
            log::warn!("⚠️ Could not update {}: {}", exclude_path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    const DIFF: &str = "diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt\n@@ -1 +1,2 @@\n one\n+two\n";

    #[test]
    fn path_uses_short_hashes_and_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = DiffReportWriter::report_path(Path::new("/repo"), "0123456789abcdef", "fedcba9876543210", at);
        assert_eq!(path, PathBuf::from("/repo/.repolyzer/diffs/diff_0123456_fedcba9_20240309_140507.md"));
    }

    #[tokio::test]
    async fn writes_report_and_excludes_state_dir_once() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/info")).unwrap();
        std::fs::write(dir.path().join(".git/info/exclude"), "# local excludes").unwrap();

        let path = DiffReportWriter::write(dir.path(), "aaaaaaaaaa", "bbbbbbbbbb", DIFF).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("- Additions: 1"));
        assert!(content.contains("+two"));

        DiffReportWriter::write(dir.path(), "aaaaaaaaaa", "cccccccccc", DIFF).await.unwrap();
        let exclude = std::fs::read_to_string(dir.path().join(".git/info/exclude")).unwrap();
        assert_eq!(exclude, "# local excludes\n.repolyzer/\n");
    }
}
