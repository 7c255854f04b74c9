//! Verdict engine: per-file findings in, commit-level decision out.
//!
//! Strict fail-closed policy: any finding blocks, regardless of which
//! rule produced it. This is also the only place detection exit codes
//! are decided; operational failures exit separately at the `main`
//! error boundary.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::ScanResult;

/// The final decision for an entire invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// No findings: the commit may proceed.
    Pass,
    /// At least one finding: the commit is blocked.
    Block,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "pass"),
            Outcome::Block => write!(f, "block"),
        }
    }
}

/// Decision plus the flagged files that produced it, in the order they
/// were first encountered.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Only files with at least one finding appear here.
    pub files: IndexMap<String, ScanResult>,
}

/// Summary statistics for a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_flagged: usize,
    pub findings: usize,
}

/// Convert aggregated scan results into the run verdict.
///
/// Block iff the map is non-empty.
pub fn decide(results: IndexMap<String, ScanResult>) -> Verdict {
    let outcome = if results.is_empty() {
        Outcome::Pass
    } else {
        Outcome::Block
    };
    Verdict {
        outcome,
        files: results,
    }
}

impl Verdict {
    /// Process exit status: 0 for pass, 1 for block.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Outcome::Pass => 0,
            Outcome::Block => 1,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            files_flagged: self.files.len(),
            findings: self.files.values().map(|r| r.findings.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Finding;

    fn flagged(file: &str, count: usize) -> ScanResult {
        ScanResult {
            file: file.to_string(),
            findings: (0..count)
                .map(|i| Finding {
                    file: file.to_string(),
                    line: i as u32 + 1,
                    rule_id: "generic-api-key".into(),
                    snippet: format!("api_key=value{i}"),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_results_pass() {
        let verdict = decide(IndexMap::new());
        assert_eq!(verdict.outcome, Outcome::Pass);
        assert_eq!(verdict.exit_code(), 0);
        assert_eq!(verdict.summary().findings, 0);
    }

    #[test]
    fn any_finding_blocks() {
        let mut results = IndexMap::new();
        results.insert("config.yml".to_string(), flagged("config.yml", 1));
        let verdict = decide(results);
        assert_eq!(verdict.outcome, Outcome::Block);
        assert_eq!(verdict.exit_code(), 1);
    }

    #[test]
    fn summary_counts_across_files() {
        let mut results = IndexMap::new();
        results.insert("a.py".to_string(), flagged("a.py", 2));
        results.insert("b.env".to_string(), flagged("b.env", 3));
        let verdict = decide(results);
        let summary = verdict.summary();
        assert_eq!(summary.files_flagged, 2);
        assert_eq!(summary.findings, 5);
    }

    #[test]
    fn outcome_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Outcome::Pass).unwrap(), "\"pass\"");
        assert_eq!(serde_json::to_string(&Outcome::Block).unwrap(), "\"block\"");
    }

    #[test]
    fn files_keep_first_encountered_order() {
        let mut results = IndexMap::new();
        results.insert("z.py".to_string(), flagged("z.py", 1));
        results.insert("a.py".to_string(), flagged("a.py", 1));
        let verdict = decide(results);
        let keys: Vec<_> = verdict.files.keys().cloned().collect();
        assert_eq!(keys, vec!["z.py", "a.py"]);
    }
}
