use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::config::constants::NOISE_DIRECTORIES;
use crate::constants::architecture_vocabulary::{
    CLEAN_ARCHITECTURE_DIRS, COMPOSE_FILES, DOC_DIR_NAMES, IMPORT_RESOLUTION_SUFFIXES, LAYER_VOCABULARY,
    MIN_SERVICES_FOR_MICROSERVICES, MVC_DIRS, README_STEM, SERVICE_CONTAINER_DIRS, SERVICE_MANIFESTS,
    SOURCE_DIR_NAMES, TEST_DIR_NAMES,
};
use crate::enums::architecture_pattern_type::ArchitecturePatternType;
use crate::enums::architecture_suggestion_type::ArchitectureSuggestionType;
use crate::enums::impact::Impact;
use crate::enums::language_family::language_for_path;
use crate::enums::organization_style::OrganizationStyle;
use crate::errors::{RepolyzerError, RepolyzerResult};
use crate::helpers::path_helper::normalize_slash_path;
use crate::structs::architecture::architecture_pattern::ArchitecturePattern;
use crate::structs::architecture::architecture_report::ArchitectureReport;
use crate::structs::architecture::architecture_suggestion::ArchitectureSuggestion;
use crate::structs::architecture::dependency_info::DependencyInfo;
use crate::structs::architecture::directory_node::DirectoryNode;

/// Module id (relative file path) to the internal modules it imports.
pub type DependencyGraph = BTreeMap<String, BTreeSet<String>>;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

static JS_IMPORTS: Lazy<Vec<Regex>> = Lazy::new(|| compile(&[
    r#"(?:^|\s)import\s+(?:[\w*{}\s,$]+\s+from\s+)?["']([^"']+)["']"#,
    r#"\brequire\(\s*["']([^"']+)["']\s*\)"#,
    r#"\bimport\(\s*["']([^"']+)["']\s*\)"#,
    r#"^\s*export\s+(?:\*|\{[^}]*\})\s+from\s+["']([^"']+)["']"#,
]));

static PYTHON_FROM_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*from\s+(\.*[\w.]*)\s+import\b").expect("python from-import regex")
});

static PYTHON_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+([\w.]+(?:\s*,\s*[\w.]+)*)").expect("python import regex")
});

static RUST_USE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+crate::([\w:]+)").expect("rust use regex")
});

static RUST_MOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+(\w+)\s*;").expect("rust mod regex")
});

static JVM_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+(?:static\s+)?([\w.]+?)(?:\.\*)?\s*;?\s*$").expect("jvm import regex")
});

pub struct ArchitectureAnalyzer {
    max_file_size: u64,
}

impl ArchitectureAnalyzer {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn analyze(&self, root: &Path) -> RepolyzerResult<ArchitectureReport> {
        log::info!("🏛️ Analyzing architecture of {}", root.display());
        let tree = Self::build_tree(root).map_err(|e| {
            RepolyzerError::analysis_error(&root.display().to_string(), "directory tree", &e.to_string(), false)
        })?;

        let mut suggestions = Self::check_structure(&tree);
        let source_root = Self::source_root(&tree);
        let organization = Self::classify_organization(source_root);
        suggestions.extend(Self::check_organization(organization, source_root));

        let graph = self.build_dependency_graph(root, &tree);
        let circular = find_circular_modules(&graph);
        for module in &circular {
            suggestions.push(ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Dependency,
                Impact::High,
                format!("Circular dependency involving {}", module),
                "Break the cycle by moving shared code into a module both sides can depend on",
            ));
        }
        let dependencies = Self::dependency_infos(&graph, &circular);

        let patterns = Self::detect_patterns(&tree);
        let (present_layers, layering) = Self::check_layering(&tree);
        suggestions.extend(layering);

        log::debug!(
            "Architecture: {} modules, {} circular, {} pattern(s)",
            dependencies.len(),
            circular.len(),
            patterns.len()
        );

        Ok(ArchitectureReport {
            organization,
            patterns,
            suggestions,
            dependencies,
            circular_dependencies: circular.into_iter().collect(),
            present_layers,
        })
    }

    pub fn build_tree(root: &Path) -> std::io::Result<DirectoryNode> {
        let root_name = root.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        Self::build_node(root, &root_name, "")
    }

    fn build_node(dir: &Path, name: &str, relative: &str) -> std::io::Result<DirectoryNode> {
        let mut children = Vec::new();
        let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let entry_name = entry.file_name().to_string_lossy().to_string();
            if entry_name.starts_with('.') {
                continue;
            }
            let child_relative = if relative.is_empty() {
                entry_name.clone()
            } else {
                format!("{}/{}", relative, entry_name)
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };

            if file_type.is_dir() {
                if NOISE_DIRECTORIES.contains(&entry_name.as_str()) {
                    continue;
                }
                match Self::build_node(&entry.path(), &entry_name, &child_relative) {
                    Ok(node) => children.push(node),
                    Err(e) => log::warn!("⚠️ Skipping unreadable directory {}: {}", child_relative, e),
                }
            } else if file_type.is_file() {
                children.push(DirectoryNode {
                    name: entry_name,
                    path: child_relative,
                    is_dir: false,
                    children: Vec::new(),
                });
            }
        }

        Ok(DirectoryNode {
            name: name.to_string(),
            path: relative.to_string(),
            is_dir: true,
            children,
        })
    }

    fn check_structure(tree: &DirectoryNode) -> Vec<ArchitectureSuggestion> {
        let mut suggestions = Vec::new();
        let has_any_dir = |names: &[&str]| names.iter().any(|n| tree.has_dir(n));

        if !has_any_dir(SOURCE_DIR_NAMES) {
            suggestions.push(ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Structure,
                Impact::Medium,
                "No dedicated source directory",
                "Keep production code under src/ so tooling and readers find it",
            ));
        }
        if !has_any_dir(TEST_DIR_NAMES) {
            suggestions.push(ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Structure,
                Impact::High,
                "No test directory",
                "Add a tests/ directory and cover the main code paths",
            ));
        }
        if !has_any_dir(DOC_DIR_NAMES) {
            suggestions.push(ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Structure,
                Impact::Low,
                "No documentation directory",
                "Add docs/ for design notes and usage guides",
            ));
        }
        let has_readme = tree.children.iter().any(|c| {
            !c.is_dir && c.name.to_lowercase().split('.').next() == Some(README_STEM)
        });
        if !has_readme {
            suggestions.push(ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Structure,
                Impact::Medium,
                "No README at the repository root",
                "Add a README describing what the project does and how to run it",
            ));
        }
        suggestions
    }

    fn source_root(tree: &DirectoryNode) -> &DirectoryNode {
        SOURCE_DIR_NAMES
            .iter()
            .find_map(|name| tree.child(name).filter(|c| c.is_dir))
            .unwrap_or(tree)
    }

    fn layer_of(dir_name: &str) -> Option<&'static str> {
        let lower = dir_name.to_lowercase();
        LAYER_VOCABULARY
            .iter()
            .find(|(_, synonyms)| synonyms.contains(&lower.as_str()))
            .map(|(layer, _)| *layer)
    }

    pub fn classify_organization(source_root: &DirectoryNode) -> OrganizationStyle {
        let (layer_dirs, feature_dirs): (Vec<&DirectoryNode>, Vec<&DirectoryNode>) = source_root
            .subdirectories()
            .filter(|d| !TEST_DIR_NAMES.contains(&d.name.as_str()))
            .partition(|d| Self::layer_of(&d.name).is_some());

        match (layer_dirs.len(), feature_dirs.len()) {
            (0, 0) => OrganizationStyle::Flat,
            (_, 0) => OrganizationStyle::LayerBased,
            (0, _) => OrganizationStyle::FeatureBased,
            _ => OrganizationStyle::Mixed,
        }
    }

    fn check_organization(organization: OrganizationStyle, source_root: &DirectoryNode) -> Vec<ArchitectureSuggestion> {
        let loose_files = source_root.children.iter().filter(|c| !c.is_dir).count();
        match organization {
            OrganizationStyle::Flat if loose_files > 10 => vec![ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Organization,
                Impact::Medium,
                format!("{} source files share one directory", loose_files),
                "Group related files into layer or feature directories",
            )],
            OrganizationStyle::Mixed => vec![ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Organization,
                Impact::Low,
                "Source tree mixes layer directories with feature directories",
                "Pick one organizing principle at the top level and nest the other inside it",
            )],
            _ => Vec::new(),
        }
    }

    fn build_dependency_graph(&self, root: &Path, tree: &DirectoryNode) -> DependencyGraph {
        let files: Vec<String> = tree.file_paths();
        let known: HashSet<&str> = files.iter().map(String::as_str).collect();
        let mut graph = DependencyGraph::new();

        for file in &files {
            let language = language_for_path(Path::new(file));
            if !matches!(language, "javascript" | "typescript" | "python" | "rust" | "java" | "kotlin") {
                continue;
            }
            let absolute = root.join(file);
            match fs::metadata(&absolute) {
                Ok(meta) if meta.len() <= self.max_file_size => {}
                _ => continue,
            }
            let content = match fs::read_to_string(&absolute) {
                Ok(content) => content,
                Err(e) => {
                    log::debug!("Skipping {} for import scan: {}", file, e);
                    continue;
                }
            };

            let targets: BTreeSet<String> = extract_imports(language, &content)
                .into_iter()
                .filter_map(|spec| resolve_import(language, file, &spec, &known, &files))
                .filter(|target| target != file)
                .collect();
            graph.insert(file.clone(), targets);
        }
        graph
    }

    fn dependency_infos(graph: &DependencyGraph, circular: &BTreeSet<String>) -> Vec<DependencyInfo> {
        let mut used_by: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for (module, dependencies) in graph {
            for dependency in dependencies {
                used_by.entry(dependency.as_str()).or_default().insert(module.as_str());
            }
        }

        graph
            .iter()
            .filter(|(module, dependencies)| !dependencies.is_empty() || used_by.contains_key(module.as_str()))
            .map(|(module, dependencies)| DependencyInfo {
                module: module.clone(),
                dependencies: dependencies.iter().cloned().collect(),
                used_by: used_by
                    .get(module.as_str())
                    .map(|set| set.iter().map(|s| s.to_string()).collect())
                    .unwrap_or_default(),
                is_circular: circular.contains(module),
            })
            .collect()
    }

    fn detect_patterns(tree: &DirectoryNode) -> Vec<ArchitecturePattern> {
        let directories: Vec<&DirectoryNode> = tree.descendants().into_iter().filter(|n| n.is_dir).collect();
        let find_all = |names: &[&str]| -> Vec<String> {
            directories
                .iter()
                .filter(|d| names.iter().any(|n| d.name.eq_ignore_ascii_case(n)))
                .map(|d| d.path.clone())
                .collect()
        };

        let mut patterns = Vec::new();
        for (pattern_type, groups) in [
            (ArchitecturePatternType::Mvc, MVC_DIRS),
            (ArchitecturePatternType::CleanArchitecture, CLEAN_ARCHITECTURE_DIRS),
        ] {
            let hits: Vec<Vec<String>> = groups.iter().map(|&names| find_all(names)).collect();
            if hits.iter().all(|h| !h.is_empty()) {
                patterns.push(ArchitecturePattern::detected(pattern_type, hits.into_iter().flatten().collect()));
            }
        }

        if let Some(evidence) = Self::microservice_evidence(tree, &directories) {
            patterns.push(ArchitecturePattern::detected(ArchitecturePatternType::Microservices, evidence));
        }
        patterns
    }

    fn microservice_evidence(tree: &DirectoryNode, directories: &[&DirectoryNode]) -> Option<Vec<String>> {
        let services: Vec<String> = directories
            .iter()
            .filter(|d| SERVICE_CONTAINER_DIRS.iter().any(|n| d.name.eq_ignore_ascii_case(n)))
            .flat_map(|container| container.subdirectories())
            .filter(|service| SERVICE_MANIFESTS.iter().any(|m| service.has_file(m)))
            .map(|service| service.path.clone())
            .collect();
        if services.len() >= MIN_SERVICES_FOR_MICROSERVICES {
            return Some(services);
        }

        let compose = COMPOSE_FILES.iter().find(|f| tree.has_file(f))?;
        let dockerfiles: Vec<String> = tree
            .descendants()
            .into_iter()
            .filter(|n| !n.is_dir && n.name == "Dockerfile")
            .map(|n| n.path.clone())
            .collect();
        if dockerfiles.len() >= MIN_SERVICES_FOR_MICROSERVICES {
            let mut evidence = vec![compose.to_string()];
            evidence.extend(dockerfiles);
            return Some(evidence);
        }
        None
    }

    fn check_layering(tree: &DirectoryNode) -> (Vec<String>, Vec<ArchitectureSuggestion>) {
        let present: BTreeSet<&str> = tree
            .descendants()
            .into_iter()
            .filter(|n| n.is_dir)
            .filter_map(|n| Self::layer_of(&n.name))
            .collect();

        let ordered_present: Vec<String> = LAYER_VOCABULARY
            .iter()
            .map(|(layer, _)| *layer)
            .filter(|layer| present.contains(layer))
            .map(String::from)
            .collect();
        let missing: Vec<&str> = LAYER_VOCABULARY
            .iter()
            .map(|(layer, _)| *layer)
            .filter(|layer| !present.contains(layer))
            .collect();

        let mut suggestions = Vec::new();
        if !ordered_present.is_empty() && !missing.is_empty() {
            suggestions.push(ArchitectureSuggestion::new(
                ArchitectureSuggestionType::Layering,
                Impact::Medium,
                format!("Layering is incomplete; missing: {}", missing.join(", ")),
                format!("Give the {} layer(s) their own directories or document why they are not needed", missing.join(", ")),
            ));
        }
        (ordered_present, suggestions)
    }
}

impl Default for ArchitectureAnalyzer {
    fn default() -> Self {
        Self::new(crate::config::constants::DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}

/// Import specifiers as written in the source, unresolved.
pub fn extract_imports(language: &str, content: &str) -> Vec<String> {
    let mut imports = Vec::new();
    for line in content.lines() {
        match language {
            "javascript" | "typescript" => {
                for regex in JS_IMPORTS.iter() {
                    imports.extend(regex.captures_iter(line).filter_map(|c| c.get(1)).map(|m| m.as_str().to_string()));
                }
            }
            "python" => {
                if let Some(m) = PYTHON_FROM_IMPORT.captures(line).and_then(|c| c.get(1)) {
                    imports.push(m.as_str().to_string());
                } else if let Some(m) = PYTHON_IMPORT.captures(line).and_then(|c| c.get(1)) {
                    imports.extend(m.as_str().split(',').map(|s| s.trim().to_string()));
                }
            }
            "rust" => {
                if let Some(m) = RUST_USE.captures(line).and_then(|c| c.get(1)) {
                    imports.push(format!("crate::{}", m.as_str().trim_end_matches(':')));
                } else if let Some(m) = RUST_MOD.captures(line).and_then(|c| c.get(1)) {
                    imports.push(format!("mod {}", m.as_str()));
                }
            }
            "java" | "kotlin" => {
                if let Some(m) = JVM_IMPORT.captures(line).and_then(|c| c.get(1)) {
                    imports.push(m.as_str().to_string());
                }
            }
            _ => {}
        }
    }
    imports
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn join_slash(base: &str, rest: &str) -> String {
    if base.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", base, rest)
    }
}

fn resolve_candidate(base: &str, known: &HashSet<&str>) -> Option<String> {
    let base = normalize_slash_path(base)?;
    IMPORT_RESOLUTION_SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", base, suffix))
        .find(|candidate| known.contains(candidate.as_str()))
}

/// Maps an import specifier to a file in the tree; external imports resolve to `None`.
pub fn resolve_import(language: &str, from_file: &str, spec: &str, known: &HashSet<&str>, files: &[String]) -> Option<String> {
    let dir = parent_dir(from_file);
    match language {
        "javascript" | "typescript" => {
            if !spec.starts_with('.') {
                return None;
            }
            resolve_candidate(&join_slash(dir, spec), known)
        }
        "python" => {
            let dots = spec.chars().take_while(|c| *c == '.').count();
            let module_path = spec[dots..].replace('.', "/");
            if dots > 0 {
                let mut base = dir.to_string();
                for _ in 1..dots {
                    base = parent_dir(&base).to_string();
                }
                return resolve_candidate(&join_slash(&base, &module_path), known);
            }
            std::iter::once(String::new())
                .chain(SOURCE_DIR_NAMES.iter().map(|s| s.to_string()))
                .find_map(|root| resolve_candidate(&join_slash(&root, &module_path), known))
        }
        "rust" => {
            if let Some(name) = spec.strip_prefix("mod ") {
                let file_name = from_file.rsplit('/').next().unwrap_or(from_file);
                let base = if matches!(file_name, "mod.rs" | "lib.rs" | "main.rs") {
                    dir.to_string()
                } else {
                    join_slash(dir, file_name.trim_end_matches(".rs"))
                };
                return resolve_candidate(&join_slash(&base, name), known);
            }
            let path = spec.strip_prefix("crate::")?;
            let crate_src = from_file
                .find("src/")
                .map(|idx| &from_file[..idx + 3])
                .unwrap_or(dir);
            let segments: Vec<&str> = path.split("::").filter(|s| !s.is_empty()).collect();
            // Longest module prefix wins; trailing segments may name items inside it.
            (1..=segments.len())
                .rev()
                .find_map(|len| resolve_candidate(&join_slash(crate_src, &segments[..len].join("/")), known))
        }
        "java" | "kotlin" => {
            let tail = spec.replace('.', "/");
            files
                .iter()
                .find(|f| {
                    let stem = f.rsplit_once('.').map(|(s, _)| s).unwrap_or(f);
                    stem == tail || stem.ends_with(&format!("/{}", tail))
                })
                .cloned()
        }
        _ => None,
    }
}

/// Modules that can reach themselves by following dependency edges.
pub fn find_circular_modules(graph: &DependencyGraph) -> BTreeSet<String> {
    let mut circular = BTreeSet::new();
    for start in graph.keys() {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = graph[start].iter().map(String::as_str).collect();
        while let Some(node) = stack.pop() {
            if node == start.as_str() {
                circular.insert(start.clone());
                break;
            }
            if !visited.insert(node) {
                continue;
            }
            if let Some(next) = graph.get(node) {
                stack.extend(next.iter().map(String::as_str));
            }
        }
    }
    circular
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn graph(edges: &[(&str, &[&str])]) -> DependencyGraph {
        edges
            .iter()
            .map(|(from, to)| (from.to_string(), to.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn finds_modules_on_a_cycle_only() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"]), ("d", &["a"])]);
        let circular = find_circular_modules(&g);
        assert_eq!(circular.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn diamond_is_not_circular() {
        let g = graph(&[("a", &["b", "c"]), ("b", &["d"]), ("c", &["d"]), ("d", &[])]);
        assert!(find_circular_modules(&g).is_empty());
    }

    #[test]
    fn skips_noise_and_dot_entries() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/index.js", "");
        write(dir.path(), "node_modules/lib/index.js", "");
        write(dir.path(), ".git/config", "");
        write(dir.path(), ".env", "");

        let tree = ArchitectureAnalyzer::build_tree(dir.path()).unwrap();
        assert_eq!(tree.file_paths(), vec!["src/index.js".to_string()]);
    }

    #[test]
    fn reports_missing_conventional_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.py", "print('hi')\n");

        let report = ArchitectureAnalyzer::default().analyze(dir.path()).unwrap();
        let structure: Vec<_> = report
            .suggestions
            .iter()
            .filter(|s| s.suggestion_type == ArchitectureSuggestionType::Structure)
            .collect();
        assert_eq!(structure.len(), 4);
        assert_eq!(report.organization, OrganizationStyle::Flat);
    }

    #[test]
    fn resolves_javascript_imports_into_a_cycle() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/a.js", "import { b } from './b';\nimport React from 'react';\n");
        write(dir.path(), "src/b.js", "const a = require('./a.js');\n");
        write(dir.path(), "src/c.js", "export * from './a';\n");

        let report = ArchitectureAnalyzer::default().analyze(dir.path()).unwrap();
        assert_eq!(report.circular_dependencies, vec!["src/a.js".to_string(), "src/b.js".to_string()]);

        let a = report.dependencies.iter().find(|d| d.module == "src/a.js").unwrap();
        assert_eq!(a.dependencies, vec!["src/b.js".to_string()]);
        assert_eq!(a.used_by, vec!["src/b.js".to_string(), "src/c.js".to_string()]);
        assert!(a.is_circular);

        let c = report.dependencies.iter().find(|d| d.module == "src/c.js").unwrap();
        assert!(!c.is_circular);
        assert!(report.suggestions.iter().any(|s| s.suggestion_type == ArchitectureSuggestionType::Dependency));
    }

    #[test]
    fn resolves_python_and_rust_imports() {
        let known_files = vec![
            "src/app/models.py".to_string(),
            "src/app/views.py".to_string(),
            "core/src/lib.rs".to_string(),
            "core/src/config/mod.rs".to_string(),
            "core/src/config/loader.rs".to_string(),
        ];
        let known: HashSet<&str> = known_files.iter().map(String::as_str).collect();

        assert_eq!(
            resolve_import("python", "src/app/views.py", ".models", &known, &known_files).as_deref(),
            Some("src/app/models.py")
        );
        assert_eq!(
            resolve_import("python", "main.py", "app.models", &known, &known_files).as_deref(),
            Some("src/app/models.py")
        );
        assert_eq!(resolve_import("python", "main.py", "os", &known, &known_files), None);
        assert_eq!(
            resolve_import("rust", "core/src/lib.rs", "mod config", &known, &known_files).as_deref(),
            Some("core/src/config/mod.rs")
        );
        assert_eq!(
            resolve_import("rust", "core/src/lib.rs", "crate::config::loader::Loader", &known, &known_files).as_deref(),
            Some("core/src/config/loader.rs")
        );
    }

    #[test]
    fn detects_mvc_and_incomplete_layering() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", "# demo\n");
        write(dir.path(), "app/models/user.rb", "");
        write(dir.path(), "app/views/user.html", "");
        write(dir.path(), "app/controllers/users.rb", "");

        let report = ArchitectureAnalyzer::default().analyze(dir.path()).unwrap();
        let mvc = report.patterns.iter().find(|p| p.pattern_type == ArchitecturePatternType::Mvc).unwrap();
        assert!((mvc.confidence - 0.8).abs() < f32::EPSILON);
        assert_eq!(report.organization, OrganizationStyle::LayerBased);
        assert_eq!(report.present_layers, vec!["presentation".to_string(), "data".to_string()]);

        let layering = report
            .suggestions
            .iter()
            .find(|s| s.suggestion_type == ArchitectureSuggestionType::Layering)
            .unwrap();
        assert!(layering.message.contains("business, infrastructure"));
    }

    #[test]
    fn detects_microservices_from_service_manifests() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "services/billing/Dockerfile", "FROM alpine\n");
        write(dir.path(), "services/users/package.json", "{}\n");
        write(dir.path(), "services/shared/README.md", "");

        let report = ArchitectureAnalyzer::default().analyze(dir.path()).unwrap();
        let pattern = report
            .patterns
            .iter()
            .find(|p| p.pattern_type == ArchitecturePatternType::Microservices)
            .unwrap();
        assert_eq!(pattern.evidence, vec!["services/billing".to_string(), "services/users".to_string()]);
    }
}
