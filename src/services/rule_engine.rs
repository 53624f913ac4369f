use regex::Regex;
use crate::enums::language_family::LanguageFamily;
use crate::structs::pattern_rule::PatternRule;

/// A pattern rule with its regex compiled.
#[derive(Debug)]
pub struct CompiledRule<C: Copy, L: Copy> {
    pub rule: PatternRule<C, L>,
    regex: Regex,
}

/// A rule hit on one line. `column` is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'a, C: Copy, L: Copy> {
    pub rule: &'a PatternRule<C, L>,
    pub line: usize,
    pub column: usize,
}

impl<C: Copy, L: Copy> CompiledRule<C, L> {
    pub fn applies_to(&self, language: LanguageFamily) -> bool {
        self.rule.languages.is_empty()
            || self.rule.languages.iter().any(|tag| language.matches_tag(*tag))
    }

    /// 1-based column of the first match on `line`.
    pub fn find(&self, line: &str) -> Option<usize> {
        self.regex.find(line).map(|m| line[..m.start()].chars().count() + 1)
    }
}

/// Compiles a rule table; rules whose pattern fails to compile are logged and left out.
pub fn compile_rules<C: Copy, L: Copy>(table: &[PatternRule<C, L>]) -> Vec<CompiledRule<C, L>> {
    table
        .iter()
        .filter_map(|rule| match Regex::new(rule.pattern) {
            Ok(regex) => Some(CompiledRule { rule: *rule, regex }),
            Err(e) => {
                log::warn!("⚠️ Rule '{}' has an invalid pattern and is disabled: {}", rule.id, e);
                None
            }
        })
        .collect()
}

/// Runs every applicable rule over every line of `content`.
pub fn scan_lines<'a, C: Copy, L: Copy>(
    rules: &'a [CompiledRule<C, L>],
    content: &str,
    language: LanguageFamily,
) -> Vec<RuleMatch<'a, C, L>> {
    let applicable: Vec<&CompiledRule<C, L>> = rules.iter().filter(|r| r.applies_to(language)).collect();
    if applicable.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for (index, line) in content.lines().enumerate() {
        for compiled in &applicable {
            if let Some(column) = compiled.find(line) {
                matches.push(RuleMatch { rule: &compiled.rule, line: index + 1, column });
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::optimization_rules::OPTIMIZATION_RULES;
    use crate::constants::security_rules::SECURITY_RULES;

    #[test]
    fn every_table_pattern_compiles() {
        assert_eq!(compile_rules(SECURITY_RULES).len(), SECURITY_RULES.len());
        assert_eq!(compile_rules(OPTIMIZATION_RULES).len(), OPTIMIZATION_RULES.len());
    }

    #[test]
    fn rule_ids_are_unique() {
        let mut ids: Vec<&str> = SECURITY_RULES.iter().map(|r| r.id)
            .chain(OPTIMIZATION_RULES.iter().map(|r| r.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn language_tags_filter_rules() {
        let rules = compile_rules(OPTIMIZATION_RULES);
        let console = rules.iter().find(|r| r.rule.id == "console-log").unwrap();
        assert!(console.applies_to(LanguageFamily::JavaScript));
        assert!(!console.applies_to(LanguageFamily::Python));

        let empty_catch = rules.iter().find(|r| r.rule.id == "empty-catch").unwrap();
        assert!(empty_catch.applies_to(LanguageFamily::Rust));
        assert!(empty_catch.applies_to(LanguageFamily::JavaScript));
    }

    #[test]
    fn columns_are_one_based_characters() {
        let rules = compile_rules(OPTIMIZATION_RULES);
        let hits = scan_lines(&rules, "let ok = 1;\n  console.log(ok);", LanguageFamily::JavaScript);
        let hit = hits.iter().find(|m| m.rule.id == "console-log").unwrap();
        assert_eq!(hit.line, 2);
        assert_eq!(hit.column, 3);
    }
}
