use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};
use crate::enums::git_error::GitError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RepolyzerError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Validation errors (bad URL, no directory selected)
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // The user backed out of a prompt or pressed Ctrl+C
    UserCancelled {
        operation: String,
    },

    // Synchronization errors
    RepositoryError {
        repository: String,
        operation: String,
        reason: String,
    },
    MergeConflict {
        repository: String,
        branch: String,
        reason: String,
    },

    // Not a failure: the working copy lives in another workspace and the
    // command has to be re-run from there
    WorkspaceSwitched {
        path: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
        context: Option<String>,
    },

    // Analysis errors
    AnalysisError {
        target: String,
        stage: String,
        reason: String,
        recoverable: bool,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },

    // Multiple errors (for batch operations)
    MultipleErrors {
        errors: Vec<RepolyzerError>,
        context: String,
    },
}

impl RepolyzerError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn repo_error(repository: &str, operation: &str, reason: &str) -> Self {
        Self::RepositoryError {
            repository: repository.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn merge_conflict(repository: &str, branch: &str, reason: &str) -> Self {
        Self::MergeConflict {
            repository: repository.to_string(),
            branch: branch.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn cancelled(operation: &str) -> Self {
        Self::UserCancelled {
            operation: operation.to_string(),
        }
    }

    pub fn workspace_switched(path: &str) -> Self {
        Self::WorkspaceSwitched {
            path: path.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(target: &str, stage: &str, reason: &str, recoverable: bool) -> Self {
        Self::AnalysisError {
            target: target.to_string(),
            stage: stage.to_string(),
            reason: reason.to_string(),
            recoverable,
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancelled { .. })
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::AnalysisError { recoverable, .. } => *recoverable,
            Self::RepositoryError { .. } => true,
            Self::ValidationError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::UserCancelled { .. } => true,
            Self::WorkspaceSwitched { .. } => true,
            Self::MergeConflict { .. } => false,
            Self::SystemError { .. } => false,
            Self::MultipleErrors { errors, .. } => errors.iter().any(|e| e.is_recoverable()),
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::MergeConflict { .. } => ErrorSeverity::High,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::AnalysisError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::RepositoryError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::UserCancelled { .. } => ErrorSeverity::Low,
            Self::WorkspaceSwitched { .. } => ErrorSeverity::Low,
            Self::MultipleErrors { errors, .. } => {
                errors.iter()
                    .map(|e| e.severity())
                    .max()
                    .unwrap_or(ErrorSeverity::Low)
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!("Validation error for '{}': value '{}' violates constraint '{}'", field, value, constraint);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::UserCancelled { operation } => {
                format!("{} cancelled", operation)
            }
            Self::RepositoryError { repository, operation, reason } => {
                format!("Repository '{}' error during {}: {}\n💡 Check the repository URL, your credentials and the network", repository, operation, reason)
            }
            Self::MergeConflict { repository, branch, reason } => {
                format!(
                    "Repository '{}' could not be updated on branch '{}': {}\n⚠️ Manual resolution required - resolve the conflict in the working copy and retry",
                    repository, branch, reason
                )
            }
            Self::WorkspaceSwitched { path } => {
                format!("Workspace switched to '{}'", path)
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, line_number, reason, context } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                if let Some(ctx) = context {
                    msg.push_str(&format!("\nContext: {}", ctx));
                }
                msg.push_str("\n💡 Check the format and syntax of the input");
                msg
            }
            Self::AnalysisError { target, stage, reason, recoverable } => {
                let mut msg = format!("Analysis error in '{}' during {}: {}", target, stage, reason);
                if *recoverable {
                    msg.push_str("\n💡 This error is recoverable - you can retry the operation");
                } else {
                    msg.push_str("\n⚠️ This error requires manual intervention");
                }
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}\n💡 This may require administrator intervention", operation, reason)
            }
            Self::MultipleErrors { errors, context } => {
                let mut msg = format!("Multiple errors occurred during {}:\n", context);
                for (i, error) in errors.iter().enumerate() {
                    msg.push_str(&format!("  {}. {}\n", i + 1, error.user_message().replace('\n', "\n     ")));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }

    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::MultipleErrors { errors, context: existing_context } => {
                Self::MultipleErrors {
                    errors,
                    context: format!("{} -> {}", existing_context, context),
                }
            }
            // Control-flow signals keep their identity so callers can still match on them
            Self::UserCancelled { .. } | Self::WorkspaceSwitched { .. } => self,
            _ => Self::MultipleErrors {
                errors: vec![self],
                context: context.to_string(),
            }
        }
    }
}

impl fmt::Display for RepolyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for RepolyzerError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for repolyzer operations
pub type RepolyzerResult<T> = Result<T, RepolyzerError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &RepolyzerError) {
        if error.is_cancellation() {
            log::debug!("{}", error.technical_details());
            return;
        }

        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        match severity {
            ErrorSeverity::Critical => {
                eprintln!("🚨 Critical error detected - application may need to exit");
            }
            ErrorSeverity::High => {
                eprintln!("⚠️ High severity error - operation failed");
            }
            ErrorSeverity::Medium => {
                eprintln!("⚠️ Error occurred - some functionality may be affected");
            }
            ErrorSeverity::Low => {}
        }

        if error.is_recoverable() {
            eprintln!("💡 Fix the issue above and run the command again");
        }
    }

    /// Log per-file failures collected during a run without aborting it
    pub fn handle_multiple_errors(errors: &[RepolyzerError], context: &str) {
        if errors.is_empty() {
            return;
        }

        log::warn!("⚠️ {} errors occurred during {}:", errors.len(), context);

        let mut by_severity: std::collections::BTreeMap<ErrorSeverity, Vec<&RepolyzerError>> = std::collections::BTreeMap::new();

        for error in errors {
            by_severity.entry(error.severity()).or_default().push(error);
        }

        for (severity, severity_errors) in by_severity.iter().rev() {
            log::warn!("{} {} ({} errors):", severity.emoji(), severity.name(), severity_errors.len());
            for (i, error) in severity_errors.iter().enumerate() {
                log::warn!("  {}. {}", i + 1, error.user_message().replace('\n', "\n     "));
            }
        }
    }
}

/// Extension trait for Result to add context
pub trait ResultExt<T> {
    fn with_context(self, context: &str) -> RepolyzerResult<T>;
    fn with_operation(self, operation: &str) -> RepolyzerResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<RepolyzerError>,
{
    fn with_context(self, context: &str) -> RepolyzerResult<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_operation(self, operation: &str) -> RepolyzerResult<T> {
        self.map_err(|e| {
            let repolyzer_error: RepolyzerError = e.into();
            match repolyzer_error {
                RepolyzerError::SystemError { reason, .. } => {
                    RepolyzerError::SystemError {
                        operation: operation.to_string(),
                        reason,
                    }
                }
                other => other.with_context(operation),
            }
        })
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for RepolyzerError {
    fn from(error: std::io::Error) -> Self {
        RepolyzerError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for RepolyzerError {
    fn from(error: serde_json::Error) -> Self {
        RepolyzerError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
            context: None,
        }
    }
}

impl From<toml::de::Error> for RepolyzerError {
    fn from(error: toml::de::Error) -> Self {
        RepolyzerError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
            context: None,
        }
    }
}

impl From<toml::ser::Error> for RepolyzerError {
    fn from(error: toml::ser::Error) -> Self {
        RepolyzerError::SystemError {
            operation: "TOML serialization".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<GitError> for RepolyzerError {
    fn from(error: GitError) -> Self {
        match error {
            GitError::CommandFailed { command, stderr, .. } => RepolyzerError::RepositoryError {
                repository: String::new(),
                operation: command,
                reason: stderr,
            },
            GitError::Spawn { command, reason } => RepolyzerError::SystemError {
                operation: command,
                reason,
            },
            GitError::InvalidOutput { command, reason } => RepolyzerError::ParseError {
                content_type: format!("git {} output", command),
                line_number: None,
                reason,
                context: None,
            },
        }
    }
}
