use std::collections::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::constants::optimization_rules::OPTIMIZATION_RULES;
use crate::enums::impact::Impact;
use crate::enums::language_family::LanguageFamily;
use crate::enums::optimization_type::OptimizationType;
use crate::services::rule_engine::{compile_rules, scan_lines, CompiledRule};
use crate::structs::config::optimization_config::OptimizationConfig;
use crate::structs::optimization_suggestion::OptimizationSuggestion;

static COMPILED_OPTIMIZATION_RULES: Lazy<Vec<CompiledRule<OptimizationType, Impact>>> =
    Lazy::new(|| compile_rules(OPTIMIZATION_RULES));

static FUNCTION_STARTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\b\s*\*?\s*([\w$]*)\s*\(",
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+\S+\s+)?fn\s+(\w+)",
        r"^\s*func\s+(?:\([^)]*\)\s*)?(\w+)\s*\(",
        r"^\s*(?:export\s+)?(?:const|let|var)\s+([\w$]+)\s*=\s*(?:async\s*)?(?:function\b|\([^)]*\)\s*=>|[\w$]+\s*=>)",
        r"^\s*(?:(?:public|private|protected|internal|static|final|abstract|synchronized|override|virtual|inline|async)\s+)*(?:[\w<>\[\],.?*&:]+\s+)+\*?&?(\w+)\s*\([^;]*$",
        r"^\s*(?:async\s+)?(\w+)\s*\([^;]*\)\s*\{",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Identifiers that look like calls but open control-flow blocks.
const NOT_FUNCTION_NAMES: &[&str] = &[
    "if", "else", "for", "while", "switch", "catch", "return", "do", "try", "match",
    "loop", "new", "sizeof", "typeof", "elif", "with", "when", "synchronized",
];

#[derive(Debug)]
struct FunctionFrame {
    name: String,
    start_line: usize,
    open_depth: usize,
}

#[derive(Debug, Default)]
struct LexState {
    in_block_comment: bool,
    /// `'a` is a lifetime rather than the start of a literal.
    lifetimes: bool,
}

#[derive(Debug, Clone)]
pub struct OptimizationAnalyzer {
    max_function_lines: usize,
    max_nesting_depth: usize,
    min_duplicate_line_length: usize,
}

impl OptimizationAnalyzer {
    pub fn new(config: &OptimizationConfig) -> Self {
        Self {
            max_function_lines: config.max_function_lines,
            max_nesting_depth: config.max_nesting_depth,
            min_duplicate_line_length: config.min_duplicate_line_length,
        }
    }

    pub fn analyze(&self, file_path: &str, content: &str, language: LanguageFamily) -> Vec<OptimizationSuggestion> {
        let mut suggestions: Vec<OptimizationSuggestion> = scan_lines(&COMPILED_OPTIMIZATION_RULES, content, language)
            .into_iter()
            .map(|hit| OptimizationSuggestion {
                suggestion_type: hit.rule.category,
                impact: hit.rule.level,
                message: hit.rule.message.to_string(),
                file_path: file_path.to_string(),
                line: Some(hit.line),
                column: Some(hit.column),
                suggestion: hit.rule.suggestion.to_string(),
                rule_id: hit.rule.id.to_string(),
            })
            .collect();

        suggestions.extend(self.find_duplicates(file_path, content));
        if language.uses_braces() {
            suggestions.extend(self.find_complexity(file_path, content, language));
        }

        suggestions.sort_by_key(|s| (s.line, s.column));
        suggestions
    }

    fn find_duplicates(&self, file_path: &str, content: &str) -> Vec<OptimizationSuggestion> {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut suggestions = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.chars().count() <= self.min_duplicate_line_length
                || !trimmed.chars().any(char::is_alphanumeric)
            {
                continue;
            }
            let line_number = index + 1;
            match first_seen.get(trimmed) {
                Some(first) => suggestions.push(OptimizationSuggestion {
                    suggestion_type: OptimizationType::Duplication,
                    impact: Impact::Low,
                    message: format!("Line duplicates line {}", first),
                    file_path: file_path.to_string(),
                    line: Some(line_number),
                    column: Some(line.chars().take_while(|c| c.is_whitespace()).count() + 1),
                    suggestion: "Extract the repeated code into a shared function or constant".to_string(),
                    rule_id: "duplicate-line".to_string(),
                }),
                None => {
                    first_seen.insert(trimmed, line_number);
                }
            }
        }
        suggestions
    }

    fn find_complexity(&self, file_path: &str, content: &str, language: LanguageFamily) -> Vec<OptimizationSuggestion> {
        let mut suggestions = Vec::new();
        let mut lex = LexState { lifetimes: language == LanguageFamily::Rust, ..LexState::default() };
        let mut depth: usize = 0;
        let mut frames: Vec<FunctionFrame> = Vec::new();
        let mut pending_function: Option<(String, usize)> = None;
        let mut nesting_flagged = false;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if pending_function.is_none() && !lex.in_block_comment {
                pending_function = Self::function_name(line).map(|name| (name, line_number));
            }

            for token in Self::structural_chars(line, &mut lex) {
                match token {
                    '{' => {
                        if let Some((name, start_line)) = pending_function.take() {
                            frames.push(FunctionFrame { name, start_line, open_depth: depth });
                        }
                        depth += 1;
                        if depth > self.max_nesting_depth && !nesting_flagged {
                            nesting_flagged = true;
                            suggestions.push(self.nesting_suggestion(file_path, line_number, depth));
                        }
                    }
                    '}' => {
                        depth = depth.saturating_sub(1);
                        if frames.last().map(|f| f.open_depth == depth).unwrap_or(false) {
                            if let Some(frame) = frames.pop() {
                                let length = line_number - frame.start_line + 1;
                                if length > self.max_function_lines {
                                    suggestions.push(self.length_suggestion(file_path, &frame, length));
                                }
                                if frames.is_empty() {
                                    nesting_flagged = false;
                                }
                            }
                        }
                        if depth == 0 {
                            nesting_flagged = false;
                        }
                    }
                    ';' => {
                        // A declaration without a body.
                        if pending_function.as_ref().map(|(_, start)| *start == line_number).unwrap_or(false) {
                            pending_function = None;
                        }
                    }
                    _ => {}
                }
            }
        }
        suggestions
    }

    fn function_name(line: &str) -> Option<String> {
        FUNCTION_STARTS.iter().find_map(|regex| {
            let name = regex.captures(line)?.get(1)?.as_str();
            if NOT_FUNCTION_NAMES.contains(&name) {
                return None;
            }
            Some(if name.is_empty() { "<anonymous>".to_string() } else { name.to_string() })
        })
    }

    /// Braces and semicolons outside strings and comments, in order.
    fn structural_chars(line: &str, lex: &mut LexState) -> Vec<char> {
        let mut tokens = Vec::new();
        let mut chars = line.chars().peekable();
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if lex.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    lex.in_block_comment = false;
                }
                continue;
            }
            if let Some(open) = quote {
                if c == '\\' {
                    chars.next();
                } else if c == open {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '`' => quote = Some(c),
                '\'' if !(lex.lifetimes && Self::is_lifetime(chars.clone())) => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    lex.in_block_comment = true;
                }
                '{' | '}' | ';' => tokens.push(c),
                _ => {}
            }
        }
        tokens
    }

    fn is_lifetime(mut rest: impl Iterator<Item = char>) -> bool {
        match (rest.next(), rest.next()) {
            (Some('\\'), _) => false,
            (Some(_), Some('\'')) => false,
            (Some(first), _) => first.is_alphabetic() || first == '_',
            _ => false,
        }
    }

    fn nesting_suggestion(&self, file_path: &str, line: usize, depth: usize) -> OptimizationSuggestion {
        OptimizationSuggestion {
            suggestion_type: OptimizationType::Complexity,
            impact: Impact::High,
            message: format!("Excessive nesting: {} levels deep (limit {})", depth, self.max_nesting_depth),
            file_path: file_path.to_string(),
            line: Some(line),
            column: None,
            suggestion: "Return early or extract the inner blocks into functions".to_string(),
            rule_id: "excessive-nesting".to_string(),
        }
    }

    fn length_suggestion(&self, file_path: &str, frame: &FunctionFrame, length: usize) -> OptimizationSuggestion {
        OptimizationSuggestion {
            suggestion_type: OptimizationType::Complexity,
            impact: Impact::Medium,
            message: format!("Function '{}' is {} lines long (limit {})", frame.name, length, self.max_function_lines),
            file_path: file_path.to_string(),
            line: Some(frame.start_line),
            column: None,
            suggestion: "Split the function into smaller, named steps".to_string(),
            rule_id: "long-function".to_string(),
        }
    }
}

impl Default for OptimizationAnalyzer {
    fn default() -> Self {
        Self::new(&OptimizationConfig::default())
    }
}
