//! Line splitting that keeps byte offsets and terminators

use serde::Serialize;

/// Line terminator convention of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Classify a single terminator as returned by [`split_lines`].
    pub(crate) fn from_terminator(terminator: &str) -> Option<Self> {
        match terminator {
            "\n" => Some(Self::Lf),
            "\r\n" => Some(Self::CrLf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// One physical line of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLine<'a> {
    /// Line content without its terminator
    pub text: &'a str,
    /// `"\n"`, `"\r\n"`, or empty on an unterminated last line
    pub terminator: &'a str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset just past the terminator
    pub end: usize,
}

/// Split a document into lines, keeping enough to splice byte ranges back.
pub(crate) fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for raw in source.split_inclusive('\n') {
        let text = match raw.strip_suffix('\n') {
            Some(body) => body.strip_suffix('\r').unwrap_or(body),
            None => raw,
        };
        let end = start + raw.len();
        lines.push(SourceLine {
            text,
            terminator: &raw[text.len()..],
            start,
            end,
        });
        start = end;
    }

    lines
}
