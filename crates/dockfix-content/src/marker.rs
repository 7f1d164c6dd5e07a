//! Fixed directive markers and line classification
//!
//! A repaired block always looks like:
//!
//! ```text
//! RUN apt-get update \
//!     && apt-get install -y --no-install-recommends \
//!         curl \
//!         git \
//!     && apt-get clean \
//!     && rm -rf /var/lib/apt/lists/* /tmp/* /var/tmp/*
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Directive text that opens an install block
pub const INSTALL_MARKER: &str = "apt-get install -y --no-install-recommends";

/// Command on the first cleanup line
pub const CLEANUP_CLEAN: &str = "apt-get clean";

/// Path removed on the second cleanup line
pub const CLEANUP_LISTS: &str = "/var/lib/apt";

/// Shell line continuation
pub const CONTINUATION: char = '\\';

/// Install marker with nothing but a continuation after it
static INSTALL_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"apt-get install -y --no-install-recommends[ \t]*\\[ \t]*$").unwrap()
});

/// Grammar for a single package name, pins and arch qualifiers included
pub static PACKAGE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+:=~-]*$").unwrap());

/// What a line inside or around an install block is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only
    Blank,
    /// A lone `\`
    Continuation,
    /// Starts with `#`
    Comment,
    /// Starts with `&&`
    Chain,
    /// A package name, continuation stripped
    Package(&'a str),
    /// Anything else
    Other,
}

/// Classify a line (without terminator).
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.len() == 1 && trimmed.starts_with(CONTINUATION) {
        return LineKind::Continuation;
    }
    if trimmed.starts_with('#') {
        return LineKind::Comment;
    }
    if trimmed.starts_with("&&") {
        return LineKind::Chain;
    }

    let name = strip_continuation(line);
    if PACKAGE_NAME_PATTERN.is_match(name) {
        LineKind::Package(name)
    } else {
        LineKind::Other
    }
}

/// Whether the line opens an install block.
pub fn is_install_line(line: &str) -> bool {
    INSTALL_LINE_PATTERN.is_match(line)
}

/// Whether the line is the first half of the cleanup marker.
pub fn is_cleanup_start(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("&&") && trimmed.contains(CLEANUP_CLEAN)
}

/// Whether the line is the second half of the cleanup marker.
pub fn is_cleanup_end(line: &str) -> bool {
    line.contains(CLEANUP_LISTS)
}

/// Whether the line ends in a continuation marker.
pub fn has_continuation(line: &str) -> bool {
    line.trim_end().ends_with(CONTINUATION)
}

/// Trim whitespace and one trailing continuation marker.
pub fn strip_continuation(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_suffix(CONTINUATION)
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

/// Leading whitespace of a line.
pub fn indentation(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - content.len()]
}
