use crate::enums::language_family::LanguageFamily;

/// One row of a pattern table: a line regex plus what to say when it matches.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule<C: Copy, L: Copy> {
    pub id: &'static str,
    pub pattern: &'static str,
    pub message: &'static str,
    pub suggestion: &'static str,
    pub category: C,
    pub level: L,
    /// Families the rule applies to; empty means all.
    pub languages: &'static [LanguageFamily],
}
