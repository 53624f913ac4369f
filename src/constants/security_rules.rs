use crate::enums::language_family::LanguageFamily;
use crate::enums::security_issue_type::SecurityIssueType;
use crate::enums::severity::Severity;
use crate::structs::pattern_rule::PatternRule;

pub type SecurityRule = PatternRule<SecurityIssueType, Severity>;

const ALL: &[LanguageFamily] = &[];
const JS: &[LanguageFamily] = &[LanguageFamily::JavaScript];
const PY: &[LanguageFamily] = &[LanguageFamily::Python];

pub const SECURITY_RULES: &[SecurityRule] = &[
    // Secret exposure
    PatternRule {
        id: "secret-assignment",
        pattern: r#"(?i)(api[_-]?key|secret(?:[_-]?key)?|password|passwd|pwd|access[_-]?token|auth[_-]?token|token|private[_-]?key|client[_-]?secret)\w*["']?\s*(?::=|[:=])\s*["'][^"']{3,}["']"#,
        message: "Hardcoded secret assigned in source",
        suggestion: "Load the value from an environment variable or a secrets manager",
        category: SecurityIssueType::SecretExposure,
        level: Severity::Critical,
        languages: ALL,
    },
    PatternRule {
        id: "aws-access-key",
        pattern: r"AKIA[0-9A-Z]{16}",
        message: "AWS access key id in source",
        suggestion: "Revoke the key and use the AWS credentials chain instead",
        category: SecurityIssueType::SecretExposure,
        level: Severity::Critical,
        languages: ALL,
    },
    PatternRule {
        id: "private-key-block",
        pattern: r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |PGP )?PRIVATE KEY",
        message: "Private key material committed to the repository",
        suggestion: "Remove the key from history and store it outside the repository",
        category: SecurityIssueType::SecretExposure,
        level: Severity::Critical,
        languages: ALL,
    },
    PatternRule {
        id: "vcs-token",
        pattern: r"\b(?:gh[pousr]_[A-Za-z0-9]{36,}|glpat-[A-Za-z0-9_-]{20,}|xox[baprs]-[0-9A-Za-z-]{10,})",
        message: "Access token for a hosted service in source",
        suggestion: "Revoke the token and inject it at runtime",
        category: SecurityIssueType::SecretExposure,
        level: Severity::Critical,
        languages: ALL,
    },
    PatternRule {
        id: "credentials-in-url",
        pattern: r"[a-zA-Z][a-zA-Z0-9+.-]*://[^\s:/@]+:[^\s@/]+@[\w.-]+",
        message: "Credentials embedded in a connection URL",
        suggestion: "Move the username and password into configuration that is not committed",
        category: SecurityIssueType::SecretExposure,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "jwt-literal",
        pattern: r"eyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}",
        message: "Signed token literal in source",
        suggestion: "Tokens expire and leak claims; generate them at runtime",
        category: SecurityIssueType::SecretExposure,
        level: Severity::High,
        languages: ALL,
    },
    // Insecure configuration
    PatternRule {
        id: "debug-enabled",
        pattern: r#"(?i)\bdebug["']?\s*[:=]\s*["']?(?:true|1)\b"#,
        message: "Debug mode enabled",
        suggestion: "Drive debug mode from the environment and keep it off in production",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::Medium,
        languages: ALL,
    },
    PatternRule {
        id: "tls-verification-disabled",
        pattern: r#"(?i)(verify\s*=\s*false|rejectUnauthorized["']?\s*:\s*false|NODE_TLS_REJECT_UNAUTHORIZED\s*=\s*["']?0|InsecureSkipVerify\s*:\s*true|danger_accept_invalid_certs\(\s*true\s*\))"#,
        message: "TLS certificate verification disabled",
        suggestion: "Keep certificate verification on and trust a custom CA if needed",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "cors-wildcard",
        pattern: r#"(?i)(access-control-allow-origin["']?\s*[:,]\s*["']\*|\borigin["']?\s*:\s*["']\*["'])"#,
        message: "CORS allows every origin",
        suggestion: "List the origins that may call this service",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "weak-hash",
        pattern: r#"(?i)(\b(?:md5|sha1)\s*\(|createHash\(\s*["'](?:md5|sha1)["']|hashlib\.(?:md5|sha1)\b|MessageDigest\.getInstance\(\s*"(?:MD5|SHA-?1)")"#,
        message: "Weak hash algorithm",
        suggestion: "Use SHA-256 or better, and a dedicated password hash for credentials",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::Medium,
        languages: ALL,
    },
    PatternRule {
        id: "plain-http-url",
        pattern: r"(?i)http://(?:[a-z0-9-]+\.)+[a-z]{2,}",
        message: "Plain HTTP endpoint",
        suggestion: "Use HTTPS for remote endpoints",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::Medium,
        languages: ALL,
    },
    PatternRule {
        id: "world-writable",
        pattern: r"(?i)(chmod\s+(?:-R\s+)?777|\b0o?777\b)",
        message: "World-writable permissions",
        suggestion: "Grant the narrowest permissions the process needs",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::Medium,
        languages: ALL,
    },
    PatternRule {
        id: "insecure-cookie",
        pattern: r#"(?i)\b(?:secure|httpOnly)["']?\s*:\s*false"#,
        message: "Cookie sent without secure or httpOnly protection",
        suggestion: "Set secure and httpOnly on session cookies",
        category: SecurityIssueType::InsecureConfiguration,
        level: Severity::Medium,
        languages: ALL,
    },
    // Unsafe input handling
    PatternRule {
        id: "eval-call",
        pattern: r"(?:^|[^\w.])eval\s*\(",
        message: "Dynamic code evaluation",
        suggestion: "Parse the input explicitly instead of evaluating it",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "function-constructor",
        pattern: r"new\s+Function\s*\(",
        message: "Code built from strings with the Function constructor",
        suggestion: "Replace with a regular function or a lookup table",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::High,
        languages: JS,
    },
    PatternRule {
        id: "inner-html",
        pattern: r"\.(?:innerHTML|outerHTML)\s*\+?=|dangerouslySetInnerHTML",
        message: "HTML injected without sanitization",
        suggestion: "Use textContent or sanitize the markup first",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::High,
        languages: JS,
    },
    PatternRule {
        id: "document-write",
        pattern: r"document\.write(?:ln)?\s*\(",
        message: "document.write with dynamic content",
        suggestion: "Build DOM nodes instead of writing raw markup",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::Medium,
        languages: JS,
    },
    PatternRule {
        id: "sql-concatenation",
        pattern: r#"(?i)\b(?:select|insert|update|delete)\b[^;]*(?:["']\s*(?:\+|\|\|)\s*\w|\$\{|["']\s*%\s*[\w(]|["']\s*\.format\()"#,
        message: "SQL statement built from interpolated values",
        suggestion: "Use parameterized queries or prepared statements",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::Critical,
        languages: ALL,
    },
    PatternRule {
        id: "sql-fstring",
        pattern: r#"(?i)\.execute\s*\(\s*f["']"#,
        message: "SQL executed from an f-string",
        suggestion: "Pass parameters to execute() instead of formatting them in",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::Critical,
        languages: PY,
    },
    PatternRule {
        id: "shell-execution",
        pattern: r"(child_process\.exec(?:Sync)?\s*\(|os\.system\s*\(|subprocess\.\w+\([^)]*shell\s*=\s*True|Runtime\.getRuntime\(\)\.exec\s*\(|\bshell_exec\s*\(|\bpassthru\s*\()",
        message: "Command executed through a shell",
        suggestion: "Pass arguments as a list without a shell and validate them",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "unsafe-deserialization",
        pattern: r"(\bpickle\.loads?\s*\(|\byaml\.load\s*\((?:[^)]*Loader\s*=\s*yaml\.(?:Unsafe)?Loader)?[^)]*\)|\bunserialize\s*\(|\bmarshal\.loads\s*\()",
        message: "Deserialization of untrusted data",
        suggestion: "Use a safe loader or a data-only format such as JSON",
        category: SecurityIssueType::UnsafeInput,
        level: Severity::High,
        languages: ALL,
    },
    // Authorization bypass
    PatternRule {
        id: "forced-auth-flag",
        pattern: r"(?i)\b(?:is_?admin|is_?authenticated|is_?authorized|is_?logged_?in)\s*=\s*(?:true|1)\b",
        message: "Authorization flag forced to true",
        suggestion: "Derive authorization from the verified session, never from a constant",
        category: SecurityIssueType::AuthorizationBypass,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "auth-disabled",
        pattern: r#"(?i)(\b(?:skip|bypass|disable|no)[_-]?auth(?:entication|orization)?["']?\s*[:=]\s*["']?(?:true|1)\b|\brequire[_-]?auth(?:entication)?["']?\s*[:=]\s*false\b)"#,
        message: "Authentication switched off",
        suggestion: "Remove the switch or restrict it to test builds",
        category: SecurityIssueType::AuthorizationBypass,
        level: Severity::High,
        languages: ALL,
    },
    PatternRule {
        id: "jwt-unverified",
        pattern: r#"(?i)(algorithms?["']?\s*[:=]\s*\[?\s*["']none["']|verify_signature["']?\s*:\s*false|jwt\.decode\([^)]*verify\s*=\s*false)"#,
        message: "Token signature not verified",
        suggestion: "Always verify token signatures with an explicit algorithm list",
        category: SecurityIssueType::AuthorizationBypass,
        level: Severity::Critical,
        languages: ALL,
    },
    PatternRule {
        id: "permit-all",
        pattern: r"(\.permitAll\(\)|\[AllowAnonymous\]|@PermitAll\b)",
        message: "Endpoint open to anonymous callers",
        suggestion: "Confirm the endpoint is meant to be public",
        category: SecurityIssueType::AuthorizationBypass,
        level: Severity::Medium,
        languages: ALL,
    },
    PatternRule {
        id: "auth-todo",
        pattern: r"(?i)(?://|#|/\*)\s*(?:todo|fixme|hack)\b.*\b(?:auth\w*|permission|access control)",
        message: "Unfinished authorization work noted in a comment",
        suggestion: "Resolve the note before shipping the code path",
        category: SecurityIssueType::AuthorizationBypass,
        level: Severity::Medium,
        languages: ALL,
    },
];
