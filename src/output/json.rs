//! JSON output renderer.
//!
//! Outputs `{"outcome": ..., "files": {...}, "summary": {...}}`.

use crate::output::OutputRenderer;
use crate::verdict::Verdict;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, verdict: &Verdict) -> String {
        let output = serde_json::json!({
            "outcome": verdict.outcome,
            "files": verdict.files,
            "summary": verdict.summary(),
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
