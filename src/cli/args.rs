//! Clap argument types, input validation, and format dispatch.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use secretgate::models::InputMode;
use secretgate::verdict::Verdict;

/// Pre-commit secret scanning guard.
#[derive(Parser, Debug)]
#[command(
    name = "secretgate",
    version,
    about = "Pre-commit guard that blocks commits containing credentials or API keys"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Scan files for secrets and decide a pass/block verdict.
    Scan(Box<ScanArgs>),

    /// List the active rule set.
    Rules(RulesArgs),

    /// Validate a patterns or rules document.
    Validate(ValidateArgs),
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Files or directories to scan. When omitted, the files staged for
    /// commit are scanned.
    pub files: Vec<PathBuf>,

    /// Scan the files staged for commit (the default with no paths).
    #[arg(long, default_value_t = false)]
    pub staged: bool,

    /// Read one candidate path per line from stdin.
    #[arg(long, default_value_t = false)]
    pub stdin: bool,

    /// Path to the repository or working directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Patterns document replacing the built-in rule set (YAML).
    #[arg(long, env = secretgate::constants::ENV_PATTERNS)]
    pub rules: Option<PathBuf>,

    /// Rules file extending the active set (TOML).
    #[arg(long, env = secretgate::constants::ENV_RULES)]
    pub additional_rules: Option<PathBuf>,

    /// Also flag high-entropy assignment values.
    #[arg(long, default_value_t = false)]
    pub entropy: bool,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Suppress the all-clear message on a pass verdict.
    #[arg(long, short = 'q', default_value_t = false)]
    pub quiet: bool,
}

/// Arguments for the `rules` subcommand.
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Path to the repository or working directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Patterns document replacing the built-in rule set (YAML).
    #[arg(long, env = secretgate::constants::ENV_PATTERNS)]
    pub rules: Option<PathBuf>,

    /// Rules file extending the active set (TOML).
    #[arg(long, env = secretgate::constants::ENV_RULES)]
    pub additional_rules: Option<PathBuf>,

    /// Include the entropy rule in the listing.
    #[arg(long, default_value_t = false)]
    pub entropy: bool,
}

/// Arguments for the `validate` subcommand.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// The patterns (YAML) or rules (TOML) document to validate.
    pub file: PathBuf,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Render the verdict using the renderer for this format.
    pub fn render(&self, verdict: &Verdict) -> String {
        use secretgate::output::OutputRenderer;
        match self {
            OutputFormat::Terminal => secretgate::output::terminal::TerminalRenderer.render(verdict),
            OutputFormat::Json => secretgate::output::json::JsonRenderer.render(verdict),
        }
    }
}

impl ScanArgs {
    /// Validate that at most one input source is requested; with none,
    /// the staged file set is the default.
    pub fn validate_input(&self) -> Result<InputMode, String> {
        let sources = [!self.files.is_empty(), self.staged, self.stdin];
        let count = sources.iter().filter(|&&x| x).count();

        if count > 1 {
            return Err(
                "only one input source allowed: positional paths, --staged, or --stdin"
                    .to_string(),
            );
        }

        if !self.files.is_empty() {
            Ok(InputMode::Paths(self.files.clone()))
        } else if self.stdin {
            Ok(InputMode::Stdin)
        } else {
            Ok(InputMode::Staged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use secretgate::verdict::decide;

    /// Helper to build a ScanArgs with the given inputs and defaults for the rest.
    fn make_args(files: Vec<&str>, staged: bool, stdin: bool) -> ScanArgs {
        ScanArgs {
            files: files.into_iter().map(PathBuf::from).collect(),
            staged,
            stdin,
            path: PathBuf::from("."),
            rules: None,
            additional_rules: None,
            entropy: false,
            format: OutputFormat::Terminal,
            quiet: false,
        }
    }

    #[test]
    fn validate_defaults_to_staged() {
        let args = make_args(vec![], false, false);
        let mode = args.validate_input().unwrap();
        assert!(matches!(mode, InputMode::Staged));
    }

    #[test]
    fn validate_explicit_staged() {
        let args = make_args(vec![], true, false);
        let mode = args.validate_input().unwrap();
        assert!(matches!(mode, InputMode::Staged));
    }

    #[test]
    fn validate_paths_input() {
        let args = make_args(vec!["a.py", "b.yml"], false, false);
        match args.validate_input().unwrap() {
            InputMode::Paths(paths) => assert_eq!(paths.len(), 2),
            other => panic!("expected Paths, got {other:?}"),
        }
    }

    #[test]
    fn validate_stdin_input() {
        let args = make_args(vec![], false, true);
        let mode = args.validate_input().unwrap();
        assert!(matches!(mode, InputMode::Stdin));
    }

    #[test]
    fn validate_paths_conflict_with_staged() {
        let args = make_args(vec!["a.py"], true, false);
        let result = args.validate_input();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("only one input source"));
    }

    #[test]
    fn validate_staged_conflicts_with_stdin() {
        let args = make_args(vec![], true, true);
        assert!(args.validate_input().is_err());
    }

    #[test]
    fn scan_args_parse_paths_and_flags() {
        let cli = Cli::try_parse_from([
            "secretgate",
            "scan",
            "src/main.rs",
            "config.yml",
            "--entropy",
            "-q",
        ])
        .unwrap();
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.files.len(), 2);
                assert!(args.entropy);
                assert!(args.quiet);
                assert!(!args.staged);
            }
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn scan_args_parse_format() {
        let cli =
            Cli::try_parse_from(["secretgate", "scan", "--staged", "--format", "json"]).unwrap();
        match cli.command {
            Command::Scan(args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected Scan command"),
        }
    }

    #[test]
    fn rules_command_parses() {
        let cli = Cli::try_parse_from(["secretgate", "rules", "--entropy"]).unwrap();
        match cli.command {
            Command::Rules(args) => assert!(args.entropy),
            _ => panic!("expected Rules command"),
        }
    }

    #[test]
    fn validate_command_requires_a_file() {
        assert!(Cli::try_parse_from(["secretgate", "validate"]).is_err());
        let cli = Cli::try_parse_from(["secretgate", "validate", "patterns.yml"]).unwrap();
        match cli.command {
            Command::Validate(args) => assert_eq!(args.file, PathBuf::from("patterns.yml")),
            _ => panic!("expected Validate command"),
        }
    }

    #[test]
    fn output_format_render_terminal() {
        let verdict = decide(IndexMap::new());
        let output = OutputFormat::Terminal.render(&verdict);
        assert!(output.contains("No secrets detected"));
    }

    #[test]
    fn output_format_render_json() {
        let verdict = decide(IndexMap::new());
        let output = OutputFormat::Json.render(&verdict);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["outcome"], "pass");
    }
}
