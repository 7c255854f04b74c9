//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and scan limits so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "secretgate";

/// Local config filename (e.g. `.secretgate.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".secretgate.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "secretgate";

/// Conventional location of the external patterns document, relative to
/// the repo root. Optional: built-in rules are used when it is absent.
pub const PATTERNS_FILE: &str = ".secretgate/patterns.yml";

/// Matched snippets are trimmed and cut at this many characters so a
/// single minified line cannot bloat the report.
pub const MAX_SNIPPET_LEN: usize = 200;

/// File extensions eligible for scanning (lowercase, compared
/// case-insensitively). Everything else is skipped without being opened.
pub const ELIGIBLE_EXTENSIONS: &[&str] = &[
    "py", "js", "jsx", "ts", "tsx", "rb", "go", "rs", "java", "kt", "scala",
    "php", "c", "h", "cpp", "hpp", "cs", "swift", "sh", "bash", "zsh", "ps1",
    "yml", "yaml", "json", "toml", "ini", "cfg", "conf", "env", "properties",
    "tf", "tfvars", "pem", "sql", "xml", "html", "txt",
];

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PATTERNS: &str = "SECRETGATE_PATTERNS";
pub const ENV_RULES: &str = "SECRETGATE_RULES";
pub const ENV_ENTROPY: &str = "SECRETGATE_ENTROPY";
