use crate::enums::impact::Impact;
use crate::enums::language_family::LanguageFamily;
use crate::enums::optimization_type::OptimizationType;
use crate::structs::pattern_rule::PatternRule;

pub type OptimizationRule = PatternRule<OptimizationType, Impact>;

const ALL: &[LanguageFamily] = &[];
const JS: &[LanguageFamily] = &[LanguageFamily::JavaScript];
const PY: &[LanguageFamily] = &[LanguageFamily::Python];
const RUST: &[LanguageFamily] = &[LanguageFamily::Rust];
const BRACES: &[LanguageFamily] = &[LanguageFamily::CStyle];
const JVM_PY: &[LanguageFamily] = &[LanguageFamily::CStyle, LanguageFamily::Python];

/// Per-line rules; complexity and duplication are structural checks in the analyzer.
pub const OPTIMIZATION_RULES: &[OptimizationRule] = &[
    // Performance
    PatternRule {
        id: "length-in-loop-condition",
        pattern: r"for\s*\([^;]*;\s*\w+\s*<=?\s*[\w.]+\.length\s*;",
        message: "Array length re-read on every loop iteration",
        suggestion: "Cache the length or iterate with for...of",
        category: OptimizationType::Performance,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "select-star",
        pattern: r"(?i)\bselect\s+\*\s+from\b",
        message: "Query selects every column",
        suggestion: "Select only the columns the caller uses",
        category: OptimizationType::Performance,
        level: Impact::Medium,
        languages: ALL,
    },
    PatternRule {
        id: "json-deep-clone",
        pattern: r"JSON\.parse\(\s*JSON\.stringify\(",
        message: "Deep clone through JSON serialization",
        suggestion: "Use structuredClone or copy only what changes",
        category: OptimizationType::Performance,
        level: Impact::Medium,
        languages: JS,
    },
    PatternRule {
        id: "async-foreach",
        pattern: r"\.forEach\(\s*async\b",
        message: "async callback passed to forEach is never awaited",
        suggestion: "Use for...of with await, or Promise.all over map",
        category: OptimizationType::Performance,
        level: Impact::Medium,
        languages: JS,
    },
    PatternRule {
        id: "sync-io",
        pattern: r"\b(?:readFileSync|writeFileSync|existsSync|execSync)\s*\(",
        message: "Blocking file or process call",
        suggestion: "Use the async variant outside of startup code",
        category: OptimizationType::Performance,
        level: Impact::Medium,
        languages: JS,
    },
    PatternRule {
        id: "blocking-sleep",
        pattern: r"\b(?:time\.sleep|Thread\.sleep)\s*\(",
        message: "Thread blocked by sleep",
        suggestion: "Schedule the work or use an async timer",
        category: OptimizationType::Performance,
        level: Impact::Medium,
        languages: JVM_PY,
    },
    PatternRule {
        id: "range-len-loop",
        pattern: r"for\s+\w+\s+in\s+range\(\s*len\(",
        message: "Index loop over range(len(...))",
        suggestion: "Iterate directly or use enumerate()",
        category: OptimizationType::Performance,
        level: Impact::Low,
        languages: PY,
    },
    PatternRule {
        id: "collect-then-len",
        pattern: r"\.collect::<Vec<[^>]*>>\(\)\s*\.len\(\)",
        message: "Vector collected only to be counted",
        suggestion: "Use .count() on the iterator",
        category: OptimizationType::Performance,
        level: Impact::Low,
        languages: RUST,
    },
    // Memory
    PatternRule {
        id: "uncleared-interval",
        pattern: r"(?:^|[^.\w])setInterval\s*\(",
        message: "Interval timer may outlive its owner",
        suggestion: "Keep the handle and clear it with clearInterval",
        category: OptimizationType::Memory,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "listener-leak",
        pattern: r"\.addEventListener\s*\(",
        message: "Event listener registered",
        suggestion: "Remove the listener when the owning component goes away",
        category: OptimizationType::Memory,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "large-preallocation",
        pattern: r"new\s+Array\(\s*\d{5,}\s*\)",
        message: "Large array preallocated up front",
        suggestion: "Grow the collection on demand or stream the data",
        category: OptimizationType::Memory,
        level: Impact::Medium,
        languages: JS,
    },
    PatternRule {
        id: "intentional-leak",
        pattern: r"\b(?:Box::leak|mem::forget)\s*\(",
        message: "Memory intentionally leaked",
        suggestion: "Prefer an owned value with a clear lifetime",
        category: OptimizationType::Memory,
        level: Impact::Medium,
        languages: RUST,
    },
    PatternRule {
        id: "manual-allocation",
        pattern: r"\b(?:malloc|calloc|realloc)\s*\(",
        message: "Manual heap allocation",
        suggestion: "Pair every allocation with a free on all paths",
        category: OptimizationType::Memory,
        level: Impact::Low,
        languages: BRACES,
    },
    // Style
    PatternRule {
        id: "var-declaration",
        pattern: r"(?:^|[^\w.$])var\s+[\w$]+",
        message: "Function-scoped var declaration",
        suggestion: "Use let or const",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "loose-equality",
        pattern: r"(?:^|[^=!<>])(?:==|!=)(?:[^=]|$)",
        message: "Loose equality comparison",
        suggestion: "Use === or !== to avoid type coercion",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "console-log",
        pattern: r"\bconsole\.(?:log|debug)\s*\(",
        message: "Console logging left in code",
        suggestion: "Use the project logger or remove the statement",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "debugger-statement",
        pattern: r"^\s*debugger\s*;?\s*$",
        message: "debugger statement left in code",
        suggestion: "Remove the statement before committing",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: JS,
    },
    PatternRule {
        id: "empty-catch",
        pattern: r"catch\s*(?:\([^)]*\))?\s*\{\s*\}",
        message: "Exception swallowed by an empty catch block",
        suggestion: "Handle or at least log the error",
        category: OptimizationType::Style,
        level: Impact::Medium,
        languages: BRACES,
    },
    PatternRule {
        id: "bare-except",
        pattern: r"^\s*except\s*:",
        message: "Bare except catches every exception",
        suggestion: "Catch the specific exception types",
        category: OptimizationType::Style,
        level: Impact::Medium,
        languages: PY,
    },
    PatternRule {
        id: "none-equality",
        pattern: r"[=!]=\s*None\b",
        message: "Comparison to None with an equality operator",
        suggestion: "Use 'is None' or 'is not None'",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: PY,
    },
    PatternRule {
        id: "unwrap-call",
        pattern: r"\.unwrap\(\)",
        message: "unwrap() panics on failure",
        suggestion: "Propagate the error with ? or handle it explicitly",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: RUST,
    },
    PatternRule {
        id: "todo-comment",
        pattern: r"(?i)(?://|#|/\*)\s*(?:todo|fixme|xxx)\b",
        message: "Outstanding TODO comment",
        suggestion: "Track the work in the issue tracker or resolve it",
        category: OptimizationType::Style,
        level: Impact::Low,
        languages: ALL,
    },
];
