/// Top-level directories that hold the main sources, in lookup order.
pub const SOURCE_DIR_NAMES: &[&str] = &["src", "lib", "app"];
pub const TEST_DIR_NAMES: &[&str] = &["tests", "test", "__tests__", "spec"];
pub const DOC_DIR_NAMES: &[&str] = &["docs", "doc"];
pub const README_STEM: &str = "readme";

/// The four canonical layers and the directory names that count as each.
pub const LAYER_VOCABULARY: &[(&str, &[&str])] = &[
    ("presentation", &[
        "presentation", "ui", "views", "view", "controllers", "controller", "components",
        "pages", "routes", "handlers", "web", "api",
    ]),
    ("business", &[
        "business", "domain", "services", "service", "usecases", "use_cases", "application",
        "core", "logic",
    ]),
    ("data", &[
        "data", "models", "model", "repositories", "repository", "entities", "db", "database",
        "persistence", "dao", "schemas",
    ]),
    ("infrastructure", &[
        "infrastructure", "infra", "config", "adapters", "gateways", "providers", "utils",
        "common", "shared",
    ]),
];

pub const MVC_DIRS: [&[&str]; 3] = [
    &["models", "model"],
    &["views", "view", "templates"],
    &["controllers", "controller"],
];

pub const CLEAN_ARCHITECTURE_DIRS: [&[&str]; 3] = [
    &["domain", "entities"],
    &["application", "usecases", "use_cases"],
    &["infrastructure", "infra"],
];

pub const SERVICE_CONTAINER_DIRS: &[&str] = &["services", "apps", "microservices", "packages"];

/// Files that mark a directory as an independently deployable service.
pub const SERVICE_MANIFESTS: &[&str] = &[
    "Dockerfile", "package.json", "Cargo.toml", "go.mod", "pom.xml", "build.gradle",
    "requirements.txt", "pyproject.toml",
];

pub const COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml", "docker-compose.yaml", "compose.yml", "compose.yaml",
];

pub const MIN_SERVICES_FOR_MICROSERVICES: usize = 2;

/// Suffixes tried, in order, when resolving an import to a file in the tree.
pub const IMPORT_RESOLUTION_SUFFIXES: &[&str] = &[
    "", ".js", ".jsx", ".ts", ".tsx", ".mjs", ".py", ".rs", ".java", ".kt",
    "/index.js", "/index.ts", "/index.tsx", "/__init__.py", "/mod.rs",
];
