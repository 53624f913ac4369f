use once_cell::sync::Lazy;
use regex::Regex;
use crate::enums::change_type::ChangeType;
use crate::structs::diff::change::Change;
use crate::structs::diff::code_difference::CodeDifference;

const FILE_HEADER: &str = "diff --git ";

static HUNK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex")
});

static GIT_HEADER_PATHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^diff --git (?:"(?:[^"\\]|\\.)*"|\S+) ("(?:[^"\\]|\\.)*"|\S+)"#).expect("git header regex")
});

/// Splits unified-diff text into ordered per-file change lists.
pub struct DiffParser;

impl DiffParser {
    pub fn parse(diff_text: &str) -> Vec<CodeDifference> {
        Self::split_files(diff_text)
            .into_iter()
            .filter_map(|segment| Self::parse_file(&segment))
            .collect()
    }

    fn split_files(diff_text: &str) -> Vec<Vec<&str>> {
        let mut segments: Vec<Vec<&str>> = Vec::new();
        for line in diff_text.lines() {
            if line.starts_with(FILE_HEADER) || segments.is_empty() {
                segments.push(Vec::new());
            }
            if let Some(current) = segments.last_mut() {
                current.push(line);
            }
        }
        segments
    }

    fn parse_file(segment: &[&str]) -> Option<CodeDifference> {
        let file_path = match Self::new_side_path(segment) {
            Some(path) => path,
            None => {
                log::debug!("Skipping diff segment without a file path");
                return None;
            }
        };

        let mut changes = Vec::new();
        let mut hunk_start: Option<usize> = None;
        for (index, line) in segment.iter().enumerate() {
            if line.starts_with("@@") {
                if let Some(start) = hunk_start {
                    changes.extend(Self::parse_hunk(&segment[start..index]));
                }
                hunk_start = Some(index);
            }
        }
        if let Some(start) = hunk_start {
            changes.extend(Self::parse_hunk(&segment[start..]));
        }

        if changes.is_empty() {
            return None;
        }

        Some(CodeDifference { file_path, changes })
    }

    fn new_side_path(segment: &[&str]) -> Option<String> {
        for line in segment {
            if line.starts_with("@@") {
                break;
            }
            if let Some(path) = line.strip_prefix("+++ ") {
                let path = path.trim();
                if path != "/dev/null" {
                    return Some(Self::strip_side(&Self::unquote_path(path), "b/"));
                }
            }
        }

        let header = segment.first()?;
        GIT_HEADER_PATHS
            .captures(header)
            .and_then(|caps| caps.get(1))
            .map(|m| Self::strip_side(&Self::unquote_path(m.as_str()), "b/"))
    }

    fn strip_side(path: &str, prefix: &str) -> String {
        path.strip_prefix(prefix).unwrap_or(path).to_string()
    }

    /// Decodes git's C-style quoting (`"b/caf\303\251.txt"`); unquoted paths pass through.
    fn unquote_path(raw: &str) -> String {
        let inner = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            Some(inner) => inner,
            None => return raw.to_string(),
        };

        let mut bytes = Vec::with_capacity(inner.len());
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                continue;
            }
            match chars.next() {
                Some('n') => bytes.push(b'\n'),
                Some('t') => bytes.push(b'\t'),
                Some('r') => bytes.push(b'\r'),
                Some('a') => bytes.push(0x07),
                Some('b') => bytes.push(0x08),
                Some('f') => bytes.push(0x0c),
                Some('v') => bytes.push(0x0b),
                Some(d @ '0'..='7') => {
                    let mut value = d.to_digit(8).unwrap_or(0);
                    for _ in 0..2 {
                        match chars.peek().and_then(|n| n.to_digit(8)) {
                            Some(digit) => {
                                value = value * 8 + digit;
                                chars.next();
                            }
                            None => break,
                        }
                    }
                    bytes.push(value as u8);
                }
                Some(other) => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
                }
                None => bytes.push(b'\\'),
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// `hunk[0]` is the `@@` header; the rest is the hunk body.
    fn parse_hunk(hunk: &[&str]) -> Vec<Change> {
        let header = match hunk.first() {
            Some(header) => header,
            None => return Vec::new(),
        };
        let mut line_number = match Self::parse_hunk_start(header) {
            Some(start) => start,
            None => {
                log::debug!("Skipping hunk with unparseable header: {}", header);
                return Vec::new();
            }
        };

        let mut changes = Vec::new();
        for line in &hunk[1..] {
            if line.starts_with('\\') {
                continue;
            }
            match ChangeType::from_marker(line) {
                Some(ChangeType::Add) => {
                    changes.push(Self::change(ChangeType::Add, line_number, line));
                    line_number += 1;
                }
                Some(ChangeType::Remove) => {
                    changes.push(Self::change(ChangeType::Remove, line_number, line));
                }
                Some(ChangeType::Modify) => {
                    line_number += 1;
                }
                None => {}
            }
        }
        changes
    }

    /// New-side starting line of a hunk header.
    pub fn parse_hunk_start(header: &str) -> Option<usize> {
        HUNK_HEADER
            .captures(header)
            .and_then(|caps| caps.get(3))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn change(change_type: ChangeType, line_number: usize, raw: &str) -> Change {
        Change {
            change_type,
            line_number,
            content: raw.get(1..).unwrap_or_default().to_string(),
            suggestion: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "diff --git a/src/app.js b/src/app.js
index 83db48f..bf269f4 100644
--- a/src/app.js
+++ b/src/app.js
@@ -1,4 +1,5 @@
 const a = 1;
-const b = 2;
+const b = 3;
+const c = 4;
 module.exports = { a, b };
@@ -10,2 +11,3 @@ function tail() {
 return a;
+// trailing
 }
diff --git a/README.md b/README.md
index 1111111..2222222 100644
--- a/README.md
+++ b/README.md
@@ -1 +1 @@
-# Old
+# New
";

    #[test]
    fn parses_files_and_line_numbers() {
        let differences = DiffParser::parse(SAMPLE);
        assert_eq!(differences.len(), 2);

        let app = &differences[0];
        assert_eq!(app.file_path, "src/app.js");
        let summary: Vec<(ChangeType, usize, &str)> = app.changes
            .iter()
            .map(|c| (c.change_type, c.line_number, c.content.as_str()))
            .collect();
        assert_eq!(summary, vec![
            (ChangeType::Remove, 2, "const b = 2;"),
            (ChangeType::Add, 2, "const b = 3;"),
            (ChangeType::Add, 3, "const c = 4;"),
            (ChangeType::Add, 12, "// trailing"),
        ]);

        let readme = &differences[1];
        assert_eq!(readme.file_path, "README.md");
        assert_eq!(readme.additions(), 1);
        assert_eq!(readme.removals(), 1);
    }

    #[test]
    fn omits_files_without_hunks() {
        let diff = "diff --git a/logo.png b/logo.png
index 1111111..2222222 100644
Binary files a/logo.png and b/logo.png differ
diff --git a/src/lib.rs b/src/lib.rs
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -3,0 +4 @@
+pub mod extra;
";
        let differences = DiffParser::parse(diff);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].file_path, "src/lib.rs");
        assert_eq!(differences[0].changes[0].line_number, 4);
    }

    #[test]
    fn skips_unparseable_hunks() {
        let diff = "diff --git a/x.txt b/x.txt
--- a/x.txt
+++ b/x.txt
@@ garbage @@
+lost
@@ -1,1 +1,2 @@
 keep
+kept
";
        let differences = DiffParser::parse(diff);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].changes.len(), 1);
        assert_eq!(differences[0].changes[0].content, "kept");
        assert_eq!(differences[0].changes[0].line_number, 2);
    }

    #[test]
    fn deleted_files_use_header_path() {
        let diff = "diff --git a/old.txt b/old.txt
deleted file mode 100644
--- a/old.txt
+++ /dev/null
@@ -1,2 +0,0 @@
-one
-two
";
        let differences = DiffParser::parse(diff);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].file_path, "old.txt");
        assert_eq!(differences[0].removals(), 2);
    }

    #[test]
    fn ignores_no_newline_marker() {
        let diff = "diff --git a/a b/a
--- a/a
+++ b/a
@@ -1 +1 @@
-x
\\ No newline at end of file
+y
\\ No newline at end of file
";
        let differences = DiffParser::parse(diff);
        assert_eq!(differences[0].changes.len(), 2);
        assert_eq!(differences[0].changes[1].line_number, 1);
    }

    #[test]
    fn quoted_paths_are_decoded() {
        let diff = "diff --git \"a/docs/caf\\303\\251 notes.txt\" \"b/docs/caf\\303\\251 notes.txt\"
--- \"a/docs/caf\\303\\251 notes.txt\"
+++ \"b/docs/caf\\303\\251 notes.txt\"
@@ -0,0 +1 @@
+hello
";
        let differences = DiffParser::parse(diff);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].file_path, "docs/café notes.txt");
    }

    #[test]
    fn quoted_header_path_is_used_for_deletions() {
        let diff = "diff --git \"a/tab\\there.txt\" \"b/tab\\there.txt\"
deleted file mode 100644
--- \"a/tab\\there.txt\"
+++ /dev/null
@@ -1 +0,0 @@
-gone
";
        let differences = DiffParser::parse(diff);
        assert_eq!(differences[0].file_path, "tab\there.txt");
    }

    #[test]
    fn text_without_headers_yields_nothing() {
        assert!(DiffParser::parse("").is_empty());
        assert!(DiffParser::parse("just some text\n+not a diff").is_empty());
    }
}
