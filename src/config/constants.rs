pub const CONFIG_DIR_NAME: &str = "repolyzer";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_CLONE_DIR_NAME: &str = "repos";
pub const DEFAULT_REPORT_DIR_NAME: &str = "reports";

pub const DEFAULT_SERVER_PORT_RANGE_START: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const MAX_REPORT_ID_LENGTH: usize = 64;

pub const ALLOWED_URL_SCHEME: &str = "https://";
pub const ALLOWED_HOSTS: &[&str] = &["github.com", "gitlab.com"];

/// Working-copy subdirectory holding generated diff reports.
pub const WORKSPACE_STATE_DIR: &str = ".repolyzer";
pub const DIFF_REPORT_SUBDIR: &str = "diffs";
pub const SHORT_HASH_LENGTH: usize = 7;
pub const STASH_MESSAGE: &str = "repolyzer-auto-stash";
pub const RECOVERY_BRANCH_PREFIX: &str = "repolyzer-recovery";
/// Hash of git's empty tree, the diff base for a root commit.
pub const EMPTY_TREE_HASH: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

pub const DEFAULT_MAX_FUNCTION_LINES: usize = 50;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 4;
pub const DEFAULT_MIN_DUPLICATE_LINE_LENGTH: usize = 30;
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 2000;
pub const DEFAULT_PARALLEL_FILES: usize = 8;

pub const NOISE_DIRECTORIES: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    "vendor",
    "__pycache__",
    "coverage",
    "out",
    "bin",
    "obj",
];

pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("c", "c"),
    ("h", "c"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("go", "go"),
    ("php", "php"),
    ("rb", "ruby"),
    ("swift", "swift"),
    ("scala", "scala"),
    ("html", "html"),
    ("css", "css"),
    ("json", "json"),
    ("xml", "xml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("ini", "ini"),
    ("md", "markdown"),
];

pub const DEFAULT_FILE_TYPE: &str = "text";
