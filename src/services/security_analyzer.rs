use once_cell::sync::Lazy;
use crate::constants::security_rules::SECURITY_RULES;
use crate::enums::language_family::LanguageFamily;
use crate::enums::security_issue_type::SecurityIssueType;
use crate::enums::severity::Severity;
use crate::services::rule_engine::{compile_rules, scan_lines, CompiledRule};
use crate::structs::config::security_config::SecurityConfig;
use crate::structs::security_issue::SecurityIssue;

static COMPILED_SECURITY_RULES: Lazy<Vec<CompiledRule<SecurityIssueType, Severity>>> =
    Lazy::new(|| compile_rules(SECURITY_RULES));

#[derive(Debug, Clone)]
pub struct SecurityAnalyzer {
    threshold: Severity,
}

impl SecurityAnalyzer {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    /// An unparseable threshold falls back to reporting everything.
    pub fn from_config(config: &SecurityConfig) -> Self {
        let threshold = config.severity_threshold.parse().unwrap_or_else(|e| {
            log::warn!("⚠️ {}, reporting every severity", e);
            Severity::Low
        });
        Self::new(threshold)
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn analyze(&self, file_path: &str, content: &str, language: LanguageFamily) -> Vec<SecurityIssue> {
        let issues: Vec<SecurityIssue> = scan_lines(&COMPILED_SECURITY_RULES, content, language)
            .into_iter()
            .filter(|hit| hit.rule.level >= self.threshold)
            .map(|hit| SecurityIssue {
                issue_type: hit.rule.category,
                severity: hit.rule.level,
                message: hit.rule.message.to_string(),
                file_path: file_path.to_string(),
                line: Some(hit.line),
                column: Some(hit.column),
                suggestion: hit.rule.suggestion.to_string(),
                rule_id: hit.rule.id.to_string(),
            })
            .collect();

        if !issues.is_empty() {
            log::debug!("🔒 {} security issue(s) in {}", issues.len(), file_path);
        }
        issues
    }

    /// Suggestion for the most severe rule matching a single line, if any.
    pub fn suggestion_for_line(&self, line: &str, language: LanguageFamily) -> Option<String> {
        COMPILED_SECURITY_RULES
            .iter()
            .filter(|compiled| compiled.applies_to(language) && compiled.rule.level >= self.threshold)
            .filter(|compiled| compiled.find(line).is_some())
            .max_by_key(|compiled| compiled.rule.level)
            .map(|compiled| format!("{} {}: {}", compiled.rule.level.emoji(), compiled.rule.message, compiled.rule.suggestion))
    }
}

impl Default for SecurityAnalyzer {
    fn default() -> Self {
        Self::new(Severity::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str, language: LanguageFamily) -> Vec<SecurityIssue> {
        SecurityAnalyzer::default().analyze("sample", content, language)
    }

    #[test]
    fn hardcoded_api_key_is_critical_secret_exposure() {
        let issues = scan(r#"const apiKey = "abc123";"#, LanguageFamily::JavaScript);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].issue_type, SecurityIssueType::SecretExposure);
        assert_eq!(issues[0].line, Some(1));
        assert_eq!(issues[0].column, Some(7));
    }

    #[test]
    fn lines_without_keywords_are_clean() {
        let content = "let total = count + 1;\nfunction add(a, b) { return a + b; }\n";
        assert!(scan(content, LanguageFamily::JavaScript).is_empty());
        assert!(scan("def total(items):\n    return sum(items)\n", LanguageFamily::Python).is_empty());
    }

    #[test]
    fn covers_each_category() {
        let content = [
            "DEBUG = True",
            "el.innerHTML = userInput;",
            "const isAdmin = true;",
            "db.query(\"SELECT * FROM users WHERE id = \" + id);",
        ]
        .join("\n");
        let issues = scan(&content, LanguageFamily::JavaScript);
        let has = |t: SecurityIssueType, line: usize| issues.iter().any(|i| i.issue_type == t && i.line == Some(line));

        assert!(has(SecurityIssueType::InsecureConfiguration, 1));
        assert!(has(SecurityIssueType::UnsafeInput, 2));
        assert!(has(SecurityIssueType::AuthorizationBypass, 3));
        assert!(issues.iter().any(|i| i.rule_id == "sql-concatenation" && i.severity == Severity::Critical));
    }

    #[test]
    fn threshold_drops_lower_severities() {
        let content = "debug: true\npassword = \"hunter22\"\n";
        let issues = SecurityAnalyzer::new(Severity::High).analyze("app.yml", content, LanguageFamily::Config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(2));
    }

    #[test]
    fn javascript_only_rules_skip_python() {
        assert!(scan("element.innerHTML = html", LanguageFamily::Python).is_empty());
    }

    #[test]
    fn local_http_urls_are_not_flagged() {
        assert!(scan("const api = 'http://localhost:3000/api';", LanguageFamily::JavaScript).is_empty());
        assert_eq!(scan("const api = 'http://example.com/api';", LanguageFamily::JavaScript).len(), 1);
    }

    #[test]
    fn suggestion_for_line_prefers_highest_severity() {
        let analyzer = SecurityAnalyzer::default();
        let suggestion = analyzer.suggestion_for_line(r#"password = "s3cret!""#, LanguageFamily::Python).unwrap();
        assert!(suggestion.contains("secrets manager"));
        assert!(analyzer.suggestion_for_line("x = 1", LanguageFamily::Python).is_none());
    }
}
