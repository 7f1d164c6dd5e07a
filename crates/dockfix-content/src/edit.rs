//! Byte-range replacements applied to document text.

use std::ops::Range;

use serde::Serialize;

/// Replacement of one byte range of a source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Splice {
    /// Range in the original source
    pub span: Range<usize>,
    /// Text previously at `span`
    pub old_content: String,
    /// Replacement text
    pub new_content: String,
}

impl Splice {
    pub fn new(span: Range<usize>, old_content: impl Into<String>, new_content: impl Into<String>) -> Self {
        Self {
            span,
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    /// Apply this splice to the source it was computed against.
    pub fn apply(&self, source: &str) -> String {
        let mut result = String::with_capacity(
            source.len() - self.span.len() + self.new_content.len(),
        );
        result.push_str(&source[..self.span.start]);
        result.push_str(&self.new_content);
        result.push_str(&source[self.span.end..]);
        result
    }

    /// Splice that undoes this one on the text it produced.
    pub fn inverse(&self) -> Self {
        let start = self.span.start;
        Self {
            span: start..start + self.new_content.len(),
            old_content: self.new_content.clone(),
            new_content: self.old_content.clone(),
        }
    }
}

/// Apply non-overlapping splices computed against the same source.
///
/// Splices are applied back to front so earlier spans stay valid.
pub fn apply_all(source: &str, splices: &[Splice]) -> String {
    let mut ordered: Vec<&Splice> = splices.iter().collect();
    ordered.sort_by_key(|s| s.span.start);

    ordered
        .into_iter()
        .rev()
        .fold(source.to_string(), |text, splice| splice.apply(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_span() {
        let splice = Splice::new(6..11, "world", "there");
        assert_eq!(splice.apply("hello world!"), "hello there!");
    }

    #[test]
    fn inverse_restores_source() {
        let source = "a\nbb\nc\n";
        let splice = Splice::new(2..5, "bb\n", "x\ny\nz\n");
        let changed = splice.apply(source);
        assert_eq!(changed, "a\nx\ny\nz\nc\n");
        assert_eq!(splice.inverse().apply(&changed), source);
    }

    #[test]
    fn apply_all_keeps_spans_valid() {
        let source = "one two three";
        let splices = [
            Splice::new(0..3, "one", "1"),
            Splice::new(8..13, "three", "3333333"),
        ];
        assert_eq!(apply_all(source, &splices), "1 two 3333333");
    }
}
