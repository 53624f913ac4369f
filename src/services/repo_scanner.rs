use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{NOISE_DIRECTORIES, SUPPORTED_FILE_EXTENSIONS};
use crate::helpers::path_helper::to_slash;
use crate::structs::config::analysis_config::AnalysisConfig;

/// Picks the files a run scans, by walking the tree or by filtering a change list.
pub struct RepoScanner {
    repo_path: PathBuf,
    patterns: HashSet<String>,
    extensions: HashSet<String>,
    max_file_size: u64,
    max_files: usize,
}

impl RepoScanner {
    pub fn new(repo_path: &Path, config: &AnalysisConfig) -> Self {
        let mut patterns: HashSet<String> = config.exclude_patterns.iter().cloned().collect();
        patterns.extend(Self::load_gitignore(repo_path));

        let extensions = if config.file_extensions.is_empty() {
            SUPPORTED_FILE_EXTENSIONS.iter().map(|(ext, _)| ext.to_string()).collect()
        } else {
            config.file_extensions.iter().map(|e| e.trim_start_matches('.').to_lowercase()).collect()
        };

        Self {
            repo_path: repo_path.to_path_buf(),
            patterns,
            extensions,
            max_file_size: config.max_file_size,
            max_files: config.max_files,
        }
    }

    fn load_gitignore(repo_path: &Path) -> HashSet<String> {
        match fs::read_to_string(repo_path.join(".gitignore")) {
            Ok(content) => content
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
                .map(|line| line.trim_start_matches('/').to_string())
                .collect(),
            Err(_) => {
                log::debug!("No .gitignore in {}", repo_path.display());
                HashSet::new()
            }
        }
    }

    /// Every eligible file under the root, as sorted `/`-separated relative paths.
    pub fn scan_files(&self) -> Vec<String> {
        let mut files = Vec::new();
        self.collect_files(&self.repo_path, &mut files);
        files.sort();
        self.cap(files)
    }

    /// Keeps the entries of a change list that still exist and are eligible.
    pub fn filter_changed(&self, changed: &[String]) -> Vec<String> {
        let mut files: Vec<String> = changed
            .iter()
            .filter(|relative| {
                let in_noise_dir = relative
                    .split('/')
                    .rev()
                    .skip(1)
                    .any(|part| part.starts_with('.') || NOISE_DIRECTORIES.contains(&part));
                !in_noise_dir && self.is_eligible(relative, &self.repo_path.join(relative.as_str()))
            })
            .cloned()
            .collect();
        files.sort();
        files.dedup();
        self.cap(files)
    }

    fn cap(&self, mut files: Vec<String>) -> Vec<String> {
        if files.len() > self.max_files {
            log::warn!("⚠️ {} files eligible, scanning the first {}", files.len(), self.max_files);
            files.truncate(self.max_files);
        }
        files
    }

    fn collect_files(&self, dir: &Path, files: &mut Vec<String>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("⚠️ Error reading directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().to_string();
            if file_name.starts_with('.') && !(Self::is_env_file(&file_name) && path.is_file()) {
                continue;
            }
            let relative_path = match path.strip_prefix(&self.repo_path) {
                Ok(rel) => to_slash(rel),
                Err(_) => continue,
            };

            if path.is_dir() {
                if NOISE_DIRECTORIES.contains(&file_name.as_str()) || self.should_ignore_path(&relative_path, &file_name, true) {
                    continue;
                }
                self.collect_files(&path, files);
            } else if self.is_eligible(&relative_path, &path) {
                files.push(relative_path);
            }
        }
    }

    fn is_eligible(&self, relative_path: &str, full_path: &Path) -> bool {
        let file_name = full_path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let extension = full_path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
        if !Self::is_env_file(&file_name) && !self.extensions.contains(&extension) {
            return false;
        }
        if self.should_ignore_path(relative_path, &file_name, false) {
            return false;
        }
        match fs::metadata(full_path) {
            Ok(meta) if meta.is_file() && meta.len() <= self.max_file_size => true,
            Ok(meta) if meta.is_file() => {
                log::debug!("Skipping {} ({} bytes over the size limit)", relative_path, meta.len());
                false
            }
            _ => false,
        }
    }

    /// Dotenv files are the one dot-file family both discovery modes scan.
    fn is_env_file(file_name: &str) -> bool {
        file_name == ".env" || file_name.starts_with(".env.")
    }

    fn should_ignore_path(&self, relative_path: &str, file_name: &str, is_dir: bool) -> bool {
        if self.patterns.contains(relative_path) || self.patterns.contains(file_name) {
            return true;
        }
        self.patterns
            .iter()
            .any(|pattern| Self::matches_ignore_pattern(relative_path, file_name, is_dir, pattern))
    }

    fn matches_ignore_pattern(relative_path: &str, file_name: &str, is_dir: bool, pattern: &str) -> bool {
        if let Some(dir_pattern) = pattern.strip_suffix('/') {
            return is_dir && (Self::matches_glob(relative_path, dir_pattern) || Self::matches_glob(file_name, dir_pattern));
        }
        if pattern.contains('*') {
            return Self::matches_glob(relative_path, pattern) || Self::matches_glob(file_name, pattern);
        }
        relative_path == pattern || file_name == pattern || relative_path.starts_with(&format!("{}/", pattern))
    }

    fn matches_glob(text: &str, pattern: &str) -> bool {
        if pattern == "*" || pattern == text {
            return true;
        }
        match pattern.find('*') {
            Some(star) => {
                let (prefix, rest) = pattern.split_at(star);
                let suffix = rest.trim_start_matches('*');
                if suffix.contains('*') {
                    // Only one wildcard run is supported; compare the literal ends.
                    let last = suffix.rsplit('*').next().unwrap_or_default();
                    return text.starts_with(prefix) && text.ends_with(last);
                }
                text.len() >= prefix.len() + suffix.len() && text.starts_with(prefix) && text.ends_with(suffix)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/app.js", "console.log(1);\n");
        write(dir.path(), "src/app.min.js", "x\n");
        write(dir.path(), "src/logo.png", "png");
        write(dir.path(), "node_modules/pkg/index.js", "x\n");
        write(dir.path(), "generated/out.py", "x = 1\n");
        write(dir.path(), ".github/workflows/ci.yml", "on: push\n");
        write(dir.path(), ".gitignore", "# build output\ngenerated/\n");
        write(dir.path(), "lib/util.py", "def f():\n    return 1\n");
        dir
    }

    #[test]
    fn scan_applies_every_exclusion() {
        let dir = fixture();
        let scanner = RepoScanner::new(dir.path(), &AnalysisConfig::default());
        assert_eq!(scanner.scan_files(), vec!["lib/util.py".to_string(), "src/app.js".to_string()]);
    }

    #[test]
    fn extension_allow_list_and_size_limit() {
        let dir = fixture();
        write(dir.path(), "src/big.js", &"a".repeat(64));
        let config = AnalysisConfig {
            file_extensions: vec![".js".to_string()],
            max_file_size: 32,
            ..AnalysisConfig::default()
        };
        let scanner = RepoScanner::new(dir.path(), &config);
        assert_eq!(scanner.scan_files(), vec!["src/app.js".to_string()]);
    }

    #[test]
    fn changed_files_keep_only_existing_eligible_entries() {
        let dir = fixture();
        let scanner = RepoScanner::new(dir.path(), &AnalysisConfig::default());
        let changed = vec![
            "src/app.js".to_string(),
            "src/deleted.js".to_string(),
            "node_modules/pkg/index.js".to_string(),
            "src/logo.png".to_string(),
            "src/app.js".to_string(),
        ];
        assert_eq!(scanner.filter_changed(&changed), vec!["src/app.js".to_string()]);
    }

    #[test]
    fn env_files_are_found_by_both_discovery_modes() {
        let dir = fixture();
        write(dir.path(), ".env", "API_KEY=abc123\n");
        write(dir.path(), "config/.env.local", "TOKEN=xyz\n");
        write(dir.path(), ".eslintrc.js", "module.exports = {};\n");
        let scanner = RepoScanner::new(dir.path(), &AnalysisConfig::default());

        let full = scanner.scan_files();
        assert_eq!(full, vec![
            ".env".to_string(),
            "config/.env.local".to_string(),
            "lib/util.py".to_string(),
            "src/app.js".to_string(),
        ]);

        let changed: Vec<String> = vec![".env".to_string(), "config/.env.local".to_string(), "src/app.js".to_string()];
        let incremental = scanner.filter_changed(&changed);
        assert!(incremental.iter().all(|f| full.contains(f)));
        assert_eq!(incremental.len(), 3);
    }

    #[test]
    fn max_files_truncates_sorted_list() {
        let dir = fixture();
        let config = AnalysisConfig { max_files: 1, ..AnalysisConfig::default() };
        assert_eq!(RepoScanner::new(dir.path(), &config).scan_files(), vec!["lib/util.py".to_string()]);
    }

    #[test]
    fn glob_forms() {
        assert!(RepoScanner::matches_glob("app.min.js", "*.min.js"));
        assert!(RepoScanner::matches_glob("test_util.py", "test_*"));
        assert!(RepoScanner::matches_glob("a.generated.rs", "*.generated.*"));
        assert!(!RepoScanner::matches_glob("app.js", "*.min.js"));
    }
}
