//! Install block normalization
//!
//! [`normalize`] finds every install block in a document, collects the
//! package tokens scattered around the cleanup marker and re-renders each
//! block so the packages form one contiguous list directly below the
//! install line:
//!
//! ```text
//! && apt-get install -y --no-install-recommends \      (verbatim)
//!     curl \                                           (one per token)
//!     git \
//! && apt-get clean \                                   (verbatim)
//! && rm -rf /var/lib/apt/lists/*                       (continuation fixed up)
//! ```
//!
//! Every package line ends with ` \`, the last one included, because the
//! cleanup line that follows starts with `&&` and has to be joined to the
//! list. A block that already has this shape renders to itself, which is
//! what makes the operation idempotent.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::block::find_blocks;
use crate::edit::{Splice, apply_all};
use crate::error::{Error, Result};

/// Knobs for [`normalize_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    indent: Option<String>,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the indentation of package lines.
    ///
    /// The indent must be non-empty and contain only spaces and tabs.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Result<Self> {
        let indent = indent.into();
        if indent.is_empty() {
            return Err(Error::invalid_indent(indent, "indent must not be empty"));
        }
        if !indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(Error::invalid_indent(
                indent,
                "indent may only contain spaces and tabs",
            ));
        }
        self.indent = Some(indent);
        Ok(self)
    }

    pub fn indent(&self) -> Option<&str> {
        self.indent.as_deref()
    }
}

/// What a normalization pass found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// At least one block was rewritten
    ///
    /// `packages` counts every token in the rewritten blocks, `misplaced`
    /// only those found after the cleanup marker.
    Fixed {
        blocks: usize,
        packages: usize,
        misplaced: usize,
    },
    /// No install block in the document
    NoMatch,
    /// Blocks exist but none holds a package token
    NoPackages,
    /// Blocks exist and are already in shape
    Unchanged,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { packages, .. } => write!(f, "fixed - moved {packages} packages"),
            Self::NoMatch => f.write_str("no match found"),
            Self::NoPackages => f.write_str("no packages found"),
            Self::Unchanged => f.write_str("no changes needed"),
        }
    }
}

/// Result of a normalization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The resulting document; equal to the input unless `changed`
    pub text: String,
    /// Whether `text` differs from the input
    pub changed: bool,
    pub outcome: Outcome,
    /// Replacements made, with spans relative to the input
    pub splices: Vec<Splice>,
}

impl Normalized {
    fn untouched(source: &str, outcome: Outcome) -> Self {
        Self {
            text: source.to_string(),
            changed: false,
            outcome,
            splices: Vec::new(),
        }
    }

    /// One-line human readable description of the outcome.
    pub fn diagnostic(&self) -> String {
        self.outcome.to_string()
    }

    /// Number of package tokens in rewritten blocks.
    pub fn packages(&self) -> usize {
        match self.outcome {
            Outcome::Fixed { packages, .. } => packages,
            _ => 0,
        }
    }

    /// Number of tokens that sat after the cleanup marker in rewritten blocks.
    pub fn misplaced(&self) -> usize {
        match self.outcome {
            Outcome::Fixed { misplaced, .. } => misplaced,
            _ => 0,
        }
    }
}

/// Normalize with default options.
pub fn normalize(source: &str) -> Normalized {
    normalize_with(source, &NormalizeOptions::default())
}

/// Normalize every install block in `source`.
///
/// Never fails: a document without blocks, or whose blocks need no repair,
/// comes back unchanged with `changed = false`.
pub fn normalize_with(source: &str, options: &NormalizeOptions) -> Normalized {
    let blocks = find_blocks(source);
    if blocks.is_empty() {
        return Normalized::untouched(source, Outcome::NoMatch);
    }

    let mut splices = Vec::new();
    let mut packages = 0;
    let mut misplaced = 0;
    let mut with_tokens = 0;

    for block in &blocks {
        if block.tokens.is_empty() {
            debug!(lines = ?block.lines, "install block has no package tokens");
            continue;
        }
        with_tokens += 1;

        let indent = match options.indent() {
            Some(indent) => indent.to_string(),
            None => block.inferred_indent(),
        };
        let rendered = block.render(&indent);
        let original = &source[block.span.clone()];
        if rendered == original {
            continue;
        }

        packages += block.tokens.len();
        misplaced += block.misplaced;
        splices.push(Splice::new(block.span.clone(), original, rendered));
    }

    if with_tokens == 0 {
        return Normalized::untouched(source, Outcome::NoPackages);
    }
    if splices.is_empty() {
        return Normalized::untouched(source, Outcome::Unchanged);
    }

    Normalized {
        text: apply_all(source, &splices),
        changed: true,
        outcome: Outcome::Fixed {
            blocks: splices.len(),
            packages,
            misplaced,
        },
        splices,
    }
}
