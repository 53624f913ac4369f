use std::path::{Component, Path, PathBuf};

/// `/`-separated form of a relative path.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves `.` and `..` lexically in a `/`-separated path; `None` when it climbs above the root.
pub fn normalize_slash_path(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

/// Canonical form when the path exists, the input otherwise.
pub fn canonical_or_self(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_relative_segments() {
        assert_eq!(normalize_slash_path("src/a/../b/./c").as_deref(), Some("src/b/c"));
        assert_eq!(normalize_slash_path("../outside"), None);
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        assert_eq!(to_slash(Path::new("./src/app.js")), "src/app.js");
    }
}
