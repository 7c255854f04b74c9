//! Terminal renderer: styled flowing text grouped by file.

use colored::Colorize;

use crate::output::OutputRenderer;
use crate::verdict::{Outcome, Verdict};

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, verdict: &Verdict) -> String {
        if verdict.outcome == Outcome::Pass {
            return format!("{}", "  ✔ No secrets detected.\n".green());
        }

        let mut output = String::new();

        for result in verdict.files.values() {
            output.push_str(&format!(
                " {} {}\n",
                "✖".red().bold(),
                result.file.bold()
            ));
            for finding in &result.findings {
                output.push_str(&format!(
                    "   line {}: {}  {}\n",
                    finding.line,
                    finding.snippet,
                    format!("[{}]", finding.rule_id).dimmed()
                ));
            }
            output.push('\n');
        }

        let summary = verdict.summary();
        output.push_str(&format!(
            "{}\n",
            "───────────────────────────────────".dimmed()
        ));
        output.push_str(&format!(
            " {} potential {} in {} {}, commit blocked\n",
            summary.findings.to_string().red().bold(),
            if summary.findings == 1 {
                "secret"
            } else {
                "secrets"
            },
            summary.files_flagged.to_string().bold(),
            if summary.files_flagged == 1 {
                "file"
            } else {
                "files"
            },
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Finding, ScanResult};
    use crate::verdict::decide;
    use indexmap::IndexMap;

    fn blocked_verdict() -> Verdict {
        let mut results = IndexMap::new();
        results.insert(
            "config.yml".to_string(),
            ScanResult {
                file: "config.yml".into(),
                findings: vec![Finding {
                    file: "config.yml".into(),
                    line: 3,
                    rule_id: "generic-api-key".into(),
                    snippet: "api_key: \"sk_live_x\"".into(),
                }],
            },
        );
        decide(results)
    }

    #[test]
    fn render_pass() {
        let verdict = decide(IndexMap::new());
        let output = TerminalRenderer.render(&verdict);
        assert!(output.contains("No secrets detected"));
    }

    #[test]
    fn render_block() {
        let output = TerminalRenderer.render(&blocked_verdict());
        assert!(output.contains("config.yml"));
        assert!(output.contains("line 3:"));
        assert!(output.contains("generic-api-key"));
        assert!(output.contains("commit blocked"));
    }
}
