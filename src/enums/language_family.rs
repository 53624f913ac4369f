use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::config::constants::SUPPORTED_FILE_EXTENSIONS;

/// Syntax family a rule set is written against.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LanguageFamily {
    /// Brace-delimited languages in the C/JavaScript tradition.
    CStyle,
    /// JavaScript and TypeScript, a subset of `CStyle` with its own idioms.
    JavaScript,
    Python,
    Rust,
    Markup,
    Config,
    Other,
}

impl LanguageFamily {
    pub fn from_language(language: &str) -> Self {
        match language {
            "javascript" | "typescript" => LanguageFamily::JavaScript,
            "java" | "kotlin" | "c" | "cpp" | "csharp" | "go" | "php" | "swift" | "scala" => LanguageFamily::CStyle,
            "rust" => LanguageFamily::Rust,
            "python" => LanguageFamily::Python,
            "html" | "css" | "xml" | "markdown" => LanguageFamily::Markup,
            "json" | "yaml" | "toml" | "ini" | "env" => LanguageFamily::Config,
            _ => LanguageFamily::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::from_language(language_for_path(path))
    }

    /// Whether blocks in this family are delimited by braces.
    pub fn uses_braces(&self) -> bool {
        matches!(self, LanguageFamily::CStyle | LanguageFamily::JavaScript | LanguageFamily::Rust)
    }

    /// Whether a rule tagged with `tag` applies to files of this family.
    pub fn matches_tag(&self, tag: LanguageFamily) -> bool {
        *self == tag || (tag == LanguageFamily::CStyle && self.uses_braces())
    }
}

pub fn language_for_path(path: &Path) -> &'static str {
    let file_name = path.file_name().map(|n| n.to_string_lossy().to_lowercase()).unwrap_or_default();
    if file_name == ".env" || file_name.starts_with(".env.") {
        return "env";
    }
    let extension = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    SUPPORTED_FILE_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
        .unwrap_or(crate::config::constants::DEFAULT_FILE_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brace_rules_apply_to_all_brace_languages() {
        assert!(LanguageFamily::JavaScript.matches_tag(LanguageFamily::CStyle));
        assert!(LanguageFamily::Rust.matches_tag(LanguageFamily::CStyle));
        assert!(!LanguageFamily::Python.matches_tag(LanguageFamily::CStyle));
        assert!(!LanguageFamily::CStyle.matches_tag(LanguageFamily::JavaScript));
    }

    #[test]
    fn detects_language_from_extension() {
        assert_eq!(LanguageFamily::from_path(Path::new("src/app.tsx")), LanguageFamily::JavaScript);
        assert_eq!(LanguageFamily::from_path(Path::new("main.py")), LanguageFamily::Python);
        assert_eq!(LanguageFamily::from_path(Path::new(".env")), LanguageFamily::Config);
        assert_eq!(LanguageFamily::from_path(Path::new("LICENSE")), LanguageFamily::Other);
    }
}
