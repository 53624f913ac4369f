use crate::config::constants::{
    DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_FUNCTION_LINES,
    DEFAULT_MAX_NESTING_DEPTH, DEFAULT_MIN_DUPLICATE_LINE_LENGTH, DEFAULT_PARALLEL_FILES,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_exclude_patterns() -> Vec<String> {
        vec![
            "*.min.js".to_string(),
            "*.lock".to_string(),
            "*.log".to_string(),
            "package-lock.json".to_string(),
        ]
    }

    pub fn default_true() -> bool {
        true
    }

    pub fn default_max_file_size() -> u64 {
        DEFAULT_MAX_FILE_SIZE_BYTES
    }

    pub fn default_max_files() -> usize {
        DEFAULT_MAX_FILES
    }

    pub fn default_parallel_files() -> usize {
        DEFAULT_PARALLEL_FILES
    }

    pub fn default_severity_threshold() -> String {
        "low".to_string()
    }

    pub fn default_max_function_lines() -> usize {
        DEFAULT_MAX_FUNCTION_LINES
    }

    pub fn default_max_nesting_depth() -> usize {
        DEFAULT_MAX_NESTING_DEPTH
    }

    pub fn default_min_duplicate_line_length() -> usize {
        DEFAULT_MIN_DUPLICATE_LINE_LENGTH
    }
}
