//! Line-level change summaries and unified diffs

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Lines of context shown around each hunk
const CONTEXT_RADIUS: usize = 3;

/// Summary of how a document changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextChange {
    /// Lines present only in the new text
    pub added: usize,
    /// Lines present only in the old text
    pub removed: usize,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
}

impl TextChange {
    /// Compare two texts line by line.
    pub fn compute(old: &str, new: &str) -> Self {
        if old == new {
            return Self::none();
        }

        let diff = TextDiff::from_lines(old, new);
        let (mut added, mut removed) = (0, 0);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => added += 1,
                ChangeTag::Delete => removed += 1,
                ChangeTag::Equal => {}
            }
        }

        Self {
            added,
            removed,
            similarity: diff.ratio() as f64,
        }
    }

    /// No change at all
    pub fn none() -> Self {
        Self {
            added: 0,
            removed: 0,
            similarity: 1.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl Default for TextChange {
    fn default() -> Self {
        Self::none()
    }
}

/// Render a unified diff labelled `a/<label>` / `b/<label>`.
///
/// Returns an empty string when the texts are equal.
pub fn unified_diff(old: &str, new: &str, label: &str) -> String {
    if old == new {
        return String::new();
    }

    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
