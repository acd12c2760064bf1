use std::path::PathBuf;

pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_WORKERS: usize = 2;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_AI_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";
pub const OLLAMA_TIMEOUT_ENV: &str = "OLLAMA_TIMEOUT";

pub const MAX_LINE_LENGTH: usize = 120;

/// Metric names recognized in line-oriented analyzer output.
pub const METRIC_KEYS: &[&str] = &[
    "total_lines",
    "code_lines",
    "comment_lines",
    "blank_lines",
    "docstring_lines",
    "file_size_bytes",
];

pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("java", "java"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("c", "c"),
    ("h", "c"),
    ("hpp", "c"),
    ("go", "go"),
    ("php", "php"),
    ("rb", "ruby"),
    ("sh", "shell"),
    ("lua", "lua"),
    ("sql", "sql"),
];

pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_lowercase();
    SUPPORTED_FILE_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| *lang)
}

/// Directories skipped when walking a directory target.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    "target",
    "node_modules",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
];

pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("enhancer")
}
