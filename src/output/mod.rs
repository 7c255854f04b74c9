//! Output renderers: terminal and JSON.

pub mod json;
pub mod terminal;

use crate::verdict::Verdict;

/// Trait for rendering a verdict to an output format.
pub trait OutputRenderer {
    /// Render the verdict to a string.
    fn render(&self, verdict: &Verdict) -> String;
}
