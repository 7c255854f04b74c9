//! Rule loading with strict fallback semantics.
//!
//! The external patterns document is optional and untrusted: any absence,
//! parse failure, or unsupported shape falls back to the built-in default
//! set with a warning on stderr. A malformed document must never abort
//! the run; the guard still has to produce a verdict.

use std::path::Path;

use serde::Deserialize;

use super::{Rule, RuleSet, builtin};
use crate::constants;

/// Accepted shapes of the external patterns document: a top-level
/// sequence of pattern strings, or a mapping with a `patterns` (or
/// `regex_patterns`) key holding such a sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternsDoc {
    List(Vec<String>),
    Map {
        #[serde(alias = "regex_patterns")]
        patterns: Vec<String>,
    },
}

/// Parse a patterns document into a non-empty list of pattern strings.
///
/// Pure: no I/O. The error string names the reason so the caller can put
/// it in the fallback warning.
pub fn parse_patterns(content: &str) -> Result<Vec<String>, String> {
    let doc: PatternsDoc = serde_yaml_ng::from_str(content)
        .map_err(|e| format!("expected a list of patterns or a `patterns` mapping: {e}"))?;
    let patterns = match doc {
        PatternsDoc::List(patterns) => patterns,
        PatternsDoc::Map { patterns } => patterns,
    };
    if patterns.is_empty() {
        return Err("pattern list is empty".to_string());
    }
    Ok(patterns)
}

/// Compile custom pattern strings into rules.
///
/// Patterns that fail to compile are dropped with a warning; the rest of
/// the set survives.
pub fn compile_patterns(patterns: &[String]) -> Vec<Rule> {
    patterns
        .iter()
        .enumerate()
        .filter_map(|(i, pattern)| {
            let id = format!("custom-{}", i + 1);
            match Rule::regex(&id, "Custom pattern", pattern) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    eprintln!("Warning: skipping pattern {}: invalid regex: {e}", i + 1);
                    None
                }
            }
        })
        .collect()
}

/// TOML additional-rules file: `[[rules]]` entries with an `id`, an
/// optional `regex`, and optional entropy thresholds.
#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    regex: Option<String>,
    /// Entropy threshold in bits per character. An entry with no `regex`
    /// and a positive threshold becomes an entropy rule.
    #[serde(default)]
    entropy: f64,
    #[serde(default = "default_min_length")]
    min_length: usize,
}

fn default_min_length() -> usize {
    20
}

/// Load additional rules from a TOML file.
///
/// Read/parse failures are an `Err` (the caller decides whether that
/// warns or aborts); individual bad entries are dropped with a warning.
pub fn load_extra_rules(path: &Path) -> Result<Vec<Rule>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read rules file {}: {e}", path.display()))?;
    let parsed: RulesFile = toml::from_str(&content)
        .map_err(|e| format!("failed to parse rules file {}: {e}", path.display()))?;

    Ok(parsed
        .rules
        .into_iter()
        .filter_map(|entry| {
            let description = if entry.description.is_empty() {
                entry.id.clone()
            } else {
                entry.description
            };
            match entry.regex {
                Some(pattern) => match Rule::regex(&entry.id, &description, &pattern) {
                    Ok(rule) => Some(rule),
                    Err(e) => {
                        eprintln!(
                            "Warning: skipping rule '{}': invalid regex: {e}",
                            entry.id
                        );
                        None
                    }
                },
                None if entry.entropy > 0.0 && entry.min_length > 0 => Some(Rule::entropy(
                    &entry.id,
                    &description,
                    entry.min_length,
                    entry.entropy,
                )),
                None => {
                    eprintln!(
                        "Warning: skipping rule '{}': neither a regex nor an entropy threshold",
                        entry.id
                    );
                    None
                }
            }
        })
        .collect())
}

/// Resolve the active rule set for this run.
///
/// `patterns_file` is an explicitly requested document (flag, env, or
/// config); when `None`, the conventional repo location is tried and its
/// absence is silent. `additional_rules` extends the set without
/// replacing it. `entropy` appends the built-in entropy rule.
pub fn load_rules(
    repo_root: &Path,
    patterns_file: Option<&Path>,
    additional_rules: Option<&Path>,
    entropy: bool,
) -> RuleSet {
    let mut rules = match patterns_file {
        Some(path) => load_patterns_document(path, true),
        None => {
            let conventional = repo_root.join(constants::PATTERNS_FILE);
            if conventional.exists() {
                load_patterns_document(&conventional, false)
            } else {
                builtin::default_rules()
            }
        }
    };

    if let Some(path) = additional_rules {
        match load_extra_rules(path) {
            Ok(extra) => rules.extend(extra),
            Err(e) => eprintln!("Warning: ignoring additional rules: {e}"),
        }
    }

    if entropy {
        rules.push(builtin::entropy_rule());
    }

    RuleSet::new(rules)
}

/// Load and compile a patterns document, falling back to the built-in
/// set whenever it cannot be used. `explicit` marks a document the user
/// asked for by path, so read failures warn too.
fn load_patterns_document(path: &Path, explicit: bool) -> Vec<Rule> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if explicit {
                eprintln!(
                    "Warning: using built-in rules: failed to read {}: {e}",
                    path.display()
                );
            }
            return builtin::default_rules();
        }
    };

    let patterns = match parse_patterns(&content) {
        Ok(patterns) => patterns,
        Err(reason) => {
            eprintln!(
                "Warning: using built-in rules: {} is invalid: {reason}",
                path.display()
            );
            return builtin::default_rules();
        }
    };

    let rules = compile_patterns(&patterns);
    if rules.is_empty() {
        eprintln!(
            "Warning: using built-in rules: no pattern in {} compiled",
            path.display()
        );
        return builtin::default_rules();
    }
    rules
}
