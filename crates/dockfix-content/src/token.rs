//! Package tokens found inside an install block

use serde::Serialize;

use crate::marker::{self, LineKind};

/// A single package entry as it appeared in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageToken {
    /// Package name with whitespace and continuation stripped
    pub name: String,
    /// The full source line, terminator excluded
    pub raw: String,
    /// Leading whitespace of the source line
    pub indent: String,
    /// 1-based line number in the document
    pub line: usize,
}

impl PackageToken {
    /// Parse a source line, returning `None` when it is not a package entry.
    pub fn parse(raw: &str, line: usize) -> Option<Self> {
        match marker::classify(raw) {
            LineKind::Package(name) => Some(Self {
                name: name.to_string(),
                raw: raw.to_string(),
                indent: marker::indentation(raw).to_string(),
                line,
            }),
            _ => None,
        }
    }

    /// Render as a list entry: `{indent}{name} \`
    pub fn render(&self, indent: &str) -> String {
        format!("{indent}{} {}", self.name, marker::CONTINUATION)
    }
}

/// Drop later repeats of a name, keeping first-seen order.
pub fn dedup_first_seen(tokens: Vec<PackageToken>) -> Vec<PackageToken> {
    let mut seen = std::collections::HashSet::new();
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.name.clone()))
        .collect()
}
