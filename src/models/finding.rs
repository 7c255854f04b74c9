//! Finding types representing scan results.

use serde::Serialize;

/// A single location in a single file that matched a detection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The scanned file path as it was supplied to the run.
    pub file: String,
    /// The line number of the match start (1-based).
    pub line: u32,
    /// Identifier of the rule that matched.
    pub rule_id: String,
    /// The line containing the match, trimmed and truncated.
    pub snippet: String,
}

/// All findings for one file, in detection order.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// The scanned file path.
    pub file: String,
    /// Findings in rule order, matches in discovery order within a rule.
    pub findings: Vec<Finding>,
}

impl ScanResult {
    /// A file with no findings is clean and never enters the verdict map.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_result_has_no_findings() {
        let result = ScanResult {
            file: "src/main.rs".into(),
            findings: vec![],
        };
        assert!(result.is_clean());
    }

    #[test]
    fn finding_serializes_to_json() {
        let finding = Finding {
            file: "config.yml".into(),
            line: 3,
            rule_id: "generic-api-key".into(),
            snippet: "api_key: \"sk_live_x\"".into(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["file"], "config.yml");
        assert_eq!(json["line"], 3);
        assert_eq!(json["rule_id"], "generic-api-key");
    }
}
