use std::path::{Path, PathBuf};
use std::fs;
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CLONE_DIR_NAME, DEFAULT_REPORT_DIR_NAME};
use crate::enums::severity::Severity;
use crate::errors::{RepolyzerError, RepolyzerResult};
use crate::structs::config::config::Config;
use crate::structs::validation_result::ValidationResult;

pub struct ConfigManager;

impl ConfigManager {

    pub fn config_dir() -> PathBuf {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME)).unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn default_clone_root() -> PathBuf {
        Self::config_dir().join(DEFAULT_CLONE_DIR_NAME)
    }

    pub fn report_dir(config: &Config) -> PathBuf {
        config.output.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::config_dir().join(DEFAULT_REPORT_DIR_NAME))
    }

    pub fn load() -> RepolyzerResult<Config> {
        let config_location = Self::config_path();

        if config_location.exists() {
            log::info!("📋 Loading config from: {}", config_location.display());
            return Self::load_from(&config_location);
        }

        log::debug!("No config file at {}, using defaults", config_location.display());
        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> RepolyzerResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| RepolyzerError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| RepolyzerError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        Ok(config)
    }

    pub fn create_sample_config() -> RepolyzerResult<PathBuf> {
        let sample_config = r#"# Repolyzer Configuration

[sync]
# Directory working copies are cloned into (prompted for when unset)
# clone_root = "/home/user/repolyzer/repos"

# Stash uncommitted changes before pulling and pop them afterwards
auto_stash = true

# Fetch tags together with all remotes
fetch_tags = true

# "stay" analyzes from the current workspace, "switch" re-runs inside the working copy
workspace_mode = "stay"

# Write a diff report into <working copy>/.repolyzer/diffs when HEAD moves
write_diff_reports = true

[analysis]
# "auto" (incremental after a pull that moved HEAD), "full" or "incremental"
mode = "auto"
exclude_patterns = ["*.min.js", "*.lock", "*.log", "package-lock.json"]
# Empty means every supported extension
file_extensions = []
max_file_size = 1048576
max_files = 2000
parallel_files = 8

[security]
enabled = true
# Drop findings below: "low", "medium", "high", "critical"
severity_threshold = "low"

[optimization]
enabled = true
max_function_lines = 50
max_nesting_depth = 4
min_duplicate_line_length = 30

[architecture]
enabled = true

[output]
# output_dir = "/home/user/repolyzer/reports"
open_in_browser = false
server_port = 8080
"#;
        let config_dir = Self::config_dir();
        let config_file_path = Self::config_path();
        fs::create_dir_all(&config_dir)?;
        if config_file_path.exists() {
            return Err(RepolyzerError::config_error(
                "Configuration file already exists",
                Some(&config_file_path.display().to_string()),
                Some("Edit the existing file or remove it first"),
            ));
        }
        fs::write(&config_file_path, sample_config)?;
        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(config_file_path)
    }

    pub fn validate_config(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        if config.security.severity_threshold.parse::<Severity>().is_err() {
            result.errors.push(format!(
                "security.severity_threshold '{}' must be one of low, medium, high, critical",
                config.security.severity_threshold
            ));
        }

        if config.optimization.max_function_lines == 0 {
            result.errors.push("optimization.max_function_lines must be greater than 0".to_string());
        }

        if config.optimization.max_nesting_depth == 0 {
            result.errors.push("optimization.max_nesting_depth must be greater than 0".to_string());
        }

        if config.analysis.parallel_files == 0 {
            result.errors.push("analysis.parallel_files must be greater than 0".to_string());
        }

        if config.analysis.max_files == 0 {
            result.errors.push("analysis.max_files must be greater than 0".to_string());
        }

        if let Some(clone_root) = &config.sync.clone_root {
            let path = Path::new(clone_root);
            if path.exists() && !path.is_dir() {
                result.errors.push(format!("sync.clone_root is not a directory: {}", clone_root));
            } else if !path.exists() {
                result.warnings.push(format!("sync.clone_root does not exist yet and will be created: {}", clone_root));
            }
        }

        if !config.security.enabled && !config.optimization.enabled && !config.architecture.enabled {
            result.warnings.push("All analyzers are disabled; reports will only contain repository info".to_string());
        }

        result.is_valid = result.errors.is_empty();
        result
    }

    /// Fails with a configuration error when validation did not pass.
    pub fn ensure_valid(config: &Config) -> RepolyzerResult<()> {
        let validation = Self::validate_config(config);
        for warning in &validation.warnings {
            log::warn!("⚠️ {}", warning);
        }
        if validation.is_valid {
            return Ok(());
        }
        Err(RepolyzerError::config_error(
            &validation.errors.join("; "),
            None,
            Some("Run 'repolyzer validate' for details"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[optimization]\nmax_nesting_depth = 6\n\n[sync]\nworkspace_mode = \"switch\"").unwrap();

        let config = ConfigManager::load_from(file.path()).unwrap();
        assert_eq!(config.optimization.max_nesting_depth, 6);
        assert_eq!(config.optimization.max_function_lines, 50);
        assert_eq!(config.sync.workspace_mode, crate::enums::workspace_mode::WorkspaceMode::Switch);
        assert!(config.security.enabled);
    }

    #[test]
    fn rejects_unknown_threshold_and_zero_limits() {
        let mut config = Config::default();
        config.security.severity_threshold = "extreme".to_string();
        config.optimization.max_nesting_depth = 0;

        let result = ConfigManager::validate_config(&config);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert!(ConfigManager::ensure_valid(&config).is_err());
    }

    #[test]
    fn malformed_file_is_a_configuration_file_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis\nmode = ").unwrap();

        match ConfigManager::load_from(file.path()) {
            Err(RepolyzerError::ConfigurationFileError { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
