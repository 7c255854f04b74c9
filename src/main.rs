//! secretgate: pre-commit secret scanning guard.
//!
//! Entry point and error handling boundary. Detection outcomes exit 0
//! (pass) or 1 (block); operational failures exit 2 so hook runners can
//! tell "secrets found" from "the guard itself broke".

mod cli;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;

use secretgate::config::Config;
use secretgate::env::Env;
use secretgate::models::InputMode;
use secretgate::rules::{self, RuleKind, RuleSet};
use secretgate::verdict::Outcome;
use secretgate::{git, orchestrator, verdict};

use cli::args::{Cli, Command, RulesArgs, ScanArgs, ValidateArgs};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => run_scan(*args),
        Command::Rules(args) => run_rules(args),
        Command::Validate(args) => run_validate(args),
    }
}

/// Scan the requested file set and print the verdict.
fn run_scan(args: ScanArgs) -> Result<i32> {
    let input_mode = args.validate_input().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Resolve repo / working directory from --path (default: cwd)
    let base_dir = std::fs::canonicalize(&args.path)
        .with_context(|| format!("--path directory not found: {}", args.path.display()))?;
    let repo_root = git::find_repo_root(&base_dir).unwrap_or_else(|_| base_dir.clone());

    let config = Config::load(Some(&repo_root), &Env::real());
    let rule_set = load_active_rules(
        &repo_root,
        &config,
        args.rules.as_deref(),
        args.additional_rules.as_deref(),
        args.entropy,
    );

    // Acquire the candidate list. Staged paths come back relative to the
    // repo root, so they are read against that base.
    let (paths, base): (Vec<PathBuf>, Option<&Path>) = match input_mode {
        InputMode::Staged => {
            let staged =
                git::staged_files(&repo_root).context("failed to list staged files")?;
            (staged, Some(repo_root.as_path()))
        }
        InputMode::Stdin => (read_paths_from_stdin(), None),
        InputMode::Paths(paths) => (orchestrator::expand_paths(&paths), None),
    };

    let results = orchestrator::scan_files(&paths, base, &rule_set);
    let verdict = verdict::decide(results);

    if !(args.quiet && verdict.outcome == Outcome::Pass) {
        print!("{}", args.format.render(&verdict));
    }

    Ok(verdict.exit_code())
}

/// List the active rule set.
fn run_rules(args: RulesArgs) -> Result<i32> {
    use colored::Colorize;

    let base_dir = std::fs::canonicalize(&args.path)
        .with_context(|| format!("--path directory not found: {}", args.path.display()))?;
    let repo_root = git::find_repo_root(&base_dir).unwrap_or_else(|_| base_dir.clone());

    let config = Config::load(Some(&repo_root), &Env::real());
    let rule_set = load_active_rules(
        &repo_root,
        &config,
        args.rules.as_deref(),
        args.additional_rules.as_deref(),
        args.entropy,
    );

    for rule in rule_set.iter() {
        let kind = match rule.kind {
            RuleKind::Regex(_) => "regex",
            RuleKind::Entropy { .. } => "entropy",
        };
        println!(
            "  {}  {}  {}",
            rule.id.bold(),
            format!("[{kind}]").cyan(),
            rule.description.dimmed(),
        );
    }
    println!("\n  {} rule(s) active", rule_set.len());

    Ok(0)
}

/// Validate a patterns (YAML) or rules (TOML) document.
fn run_validate(args: ValidateArgs) -> Result<i32> {
    use colored::Colorize;

    let path = &args.file;
    if path.extension().is_some_and(|ext| ext == "toml") {
        match rules::loader::load_extra_rules(path) {
            Ok(loaded) => {
                println!(
                    "  {} {} rule(s) would load from {}",
                    "✔".green().bold(),
                    loaded.len(),
                    path.display(),
                );
                Ok(0)
            }
            Err(e) => bail!("invalid rules file: {e}"),
        }
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let patterns = match rules::loader::parse_patterns(&content) {
            Ok(patterns) => patterns,
            Err(e) => bail!("invalid patterns document: {e}"),
        };
        let compiled = rules::loader::compile_patterns(&patterns);
        if compiled.is_empty() {
            bail!("no pattern in {} compiles", path.display());
        }
        println!(
            "  {} {} of {} pattern(s) compile",
            "✔".green().bold(),
            compiled.len(),
            patterns.len(),
        );
        Ok(0)
    }
}

/// Resolve the active rule set: CLI flags take priority, then config.
fn load_active_rules(
    repo_root: &Path,
    config: &Config,
    rules_flag: Option<&Path>,
    additional_flag: Option<&Path>,
    entropy_flag: bool,
) -> RuleSet {
    let patterns = rules_flag.map(Path::to_path_buf).or_else(|| {
        config
            .rules
            .patterns_file
            .as_ref()
            .map(|p| resolve_config_path(repo_root, p))
    });
    let additional = additional_flag.map(Path::to_path_buf).or_else(|| {
        config
            .rules
            .additional_rules
            .as_ref()
            .map(|p| resolve_config_path(repo_root, p))
    });
    let entropy = entropy_flag || config.scan.entropy;

    rules::load_rules(repo_root, patterns.as_deref(), additional.as_deref(), entropy)
}

/// Config-sourced paths are relative to the repo root; CLI paths are
/// used as given.
fn resolve_config_path(repo_root: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        repo_root.join(path)
    }
}

/// One candidate path per line; blank lines are skipped.
fn read_paths_from_stdin() -> Vec<PathBuf> {
    std::io::stdin()
        .lock()
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
