//! Install block detection and rendering

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::line::{LineEnding, SourceLine, split_lines};
use crate::marker::{self, LineKind};
use crate::token::{PackageToken, dedup_first_seen};

/// Indent appended to the cleanup indentation when no package line shows one
const FALLBACK_INDENT: &str = "    ";

/// An install block located in a document
///
/// The block starts at the install line and ends after the last misplaced
/// package following the cleanup marker (or after the cleanup marker when
/// nothing follows it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallBlock {
    /// Byte range in the source, terminator of the last line included
    pub span: Range<usize>,
    /// 1-based line range covered by the block
    pub lines: Range<usize>,
    /// The install line, kept verbatim
    pub install: String,
    /// The two cleanup lines
    pub cleanup: [String; 2],
    /// Package tokens in first-seen order, repeats removed
    pub tokens: Vec<PackageToken>,
    /// Number of tokens that sat after the cleanup marker
    pub misplaced: usize,
    /// Whether the RUN instruction carries on past the block
    pub continues: bool,
    line_ending: LineEnding,
    final_terminator: String,
}

impl InstallBlock {
    /// Indent used for package lines when none is forced.
    pub fn inferred_indent(&self) -> String {
        match self.tokens.first() {
            Some(token) if !token.indent.is_empty() => token.indent.clone(),
            _ => format!(
                "{}{FALLBACK_INDENT}",
                marker::indentation(&self.cleanup[0])
            ),
        }
    }

    /// Render the repaired block text for this span.
    pub fn render(&self, indent: &str) -> String {
        let eol = self.line_ending.as_str();
        let mut lines = Vec::with_capacity(self.tokens.len() + 3);

        lines.push(self.install.clone());
        lines.extend(self.tokens.iter().map(|t| t.render(indent)));
        lines.push(self.cleanup[0].clone());
        lines.push(self.render_cleanup_end());

        let mut out = lines.join(eol);
        out.push_str(&self.final_terminator);
        out
    }

    /// Second cleanup line, continued only when the RUN goes on after the block.
    fn render_cleanup_end(&self) -> String {
        let end = &self.cleanup[1];
        match (marker::has_continuation(end), self.continues) {
            (false, true) => format!("{} {}", end.trim_end(), marker::CONTINUATION),
            (true, false) => {
                let body = end.trim_end();
                body[..body.len() - 1].trim_end().to_string()
            }
            _ => end.clone(),
        }
    }
}

/// Find every install block in the document.
///
/// Blocks never overlap; scanning resumes after the end of each block.
pub fn find_blocks(source: &str) -> Vec<InstallBlock> {
    let lines = split_lines(source);
    let mut blocks = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        if !marker::is_install_line(lines[index].text) {
            index += 1;
            continue;
        }

        match scan_block(&lines, index) {
            Some(block) => {
                index = block.lines.end - 1;
                blocks.push(block);
            }
            None => index += 1,
        }
    }

    blocks
}

/// Try to read a block whose install line is at `start`.
fn scan_block(lines: &[SourceLine<'_>], start: usize) -> Option<InstallBlock> {
    let install = &lines[start];
    let line_ending = LineEnding::from_terminator(install.terminator)?;

    let mut tokens = Vec::new();
    let mut cursor = start + 1;

    // Leading region: everything up to the cleanup marker
    loop {
        let line = lines.get(cursor)?;
        if marker::is_cleanup_start(line.text) {
            break;
        }
        match marker::classify(line.text) {
            LineKind::Package(_) => tokens.extend(PackageToken::parse(line.text, cursor + 1)),
            LineKind::Blank | LineKind::Continuation | LineKind::Comment => {
                debug!(line = cursor + 1, "skipping non-package line in install block");
            }
            LineKind::Chain | LineKind::Other => {
                debug!(
                    line = start + 1,
                    stopped_at = cursor + 1,
                    "install line not followed by a cleanup marker"
                );
                return None;
            }
        }
        cursor += 1;
    }

    let cleanup_start = &lines[cursor];
    let cleanup_end = lines.get(cursor + 1)?;
    if !marker::is_cleanup_end(cleanup_end.text) {
        debug!(line = cursor + 2, "cleanup marker missing its apt lists line");
        return None;
    }
    cursor += 2;
    let trailing_start = cursor;

    // Trailing region: indented package lines misplaced after the cleanup
    let leading = tokens.len();
    while let Some(line) = lines.get(cursor) {
        if !line.text.starts_with([' ', '\t']) {
            break;
        }
        match marker::classify(line.text) {
            LineKind::Package(_) => tokens.extend(PackageToken::parse(line.text, cursor + 1)),
            LineKind::Continuation => {}
            _ => break,
        }
        cursor += 1;
    }
    let misplaced = tokens.len() - leading;

    // With nothing moved the cleanup line keeps its own continuation;
    // otherwise only a following `&&` chain needs one.
    let continues = if cursor == trailing_start {
        marker::has_continuation(cleanup_end.text)
    } else {
        matches!(lines.get(cursor).map(|l| marker::classify(l.text)), Some(LineKind::Chain))
    };

    let last = &lines[cursor - 1];
    let block = InstallBlock {
        span: install.start..last.end,
        lines: start + 1..cursor + 1,
        install: install.text.to_string(),
        cleanup: [cleanup_start.text.to_string(), cleanup_end.text.to_string()],
        tokens: dedup_first_seen(tokens),
        misplaced,
        continues,
        line_ending,
        final_terminator: last.terminator.to_string(),
    };

    debug!(
        lines = ?block.lines,
        packages = block.tokens.len(),
        misplaced,
        "found install block"
    );
    Some(block)
}
