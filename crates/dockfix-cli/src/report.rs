//! Per-file status lines and batch summaries

use std::path::{Path, PathBuf};

use colored::Colorize;
use dockfix_content::InstallBlock;
use serde::Serialize;

/// Outcome of processing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Rewritten on disk
    Fixed,
    /// Would be rewritten (dry run or check)
    WouldFix,
    /// Nothing to change
    Unchanged,
    /// Could not be read or written
    Error,
}

/// Install block as found in the file before any rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    /// First line of the block, 1-based
    pub start_line: usize,
    /// Last line of the block, inclusive
    pub end_line: usize,
    pub packages: usize,
    pub misplaced: usize,
}

impl From<&InstallBlock> for BlockSummary {
    fn from(block: &InstallBlock) -> Self {
        Self {
            start_line: block.lines.start,
            end_line: block.lines.end - 1,
            packages: block.tokens.len(),
            misplaced: block.misplaced,
        }
    }
}

/// Report line for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub diagnostic: String,
    pub packages: usize,
    pub misplaced: usize,
    /// Lines added and removed by the rewrite
    pub added: usize,
    pub removed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileReport {
    pub fn error(path: impl Into<PathBuf>, error: &dyn std::error::Error) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Error,
            diagnostic: error.to_string(),
            packages: 0,
            misplaced: 0,
            added: 0,
            removed: 0,
            blocks: Vec::new(),
            diff: None,
        }
    }

    /// Trailing detail for the status line, empty when nothing changed.
    fn detail(&self) -> String {
        if self.added == 0 && self.removed == 0 {
            return String::new();
        }
        format!(
            " ({} misplaced, +{} -{} lines)",
            self.misplaced, self.added, self.removed
        )
    }
}

/// Aggregate of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    /// Files fixed, or that would be fixed when nothing is written
    pub fixed: usize,
    pub errors: usize,
    pub skipped: usize,
    /// Lines added and removed across all files
    pub added: usize,
    pub removed: usize,
}

impl BatchReport {
    pub fn push(&mut self, report: FileReport) {
        match report.status {
            FileStatus::Fixed | FileStatus::WouldFix => self.fixed += 1,
            FileStatus::Error => self.errors += 1,
            FileStatus::Unchanged => self.skipped += 1,
        }
        self.added += report.added;
        self.removed += report.removed;
        self.files.push(report);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_changes(&self) -> bool {
        self.fixed > 0
    }

    /// Print one line per file and the summary.
    ///
    /// Unchanged files are only listed when `verbose` is set.
    pub fn print_human(&self, verbose: bool, writes: bool) {
        if self.files.is_empty() {
            println!("{} No Dockerfiles found.", "!".yellow().bold());
            return;
        }

        for file in &self.files {
            let label = match file.status {
                FileStatus::Fixed => pad("fixed").green().bold(),
                FileStatus::WouldFix => pad("would fix").yellow().bold(),
                FileStatus::Error => pad("error").red().bold(),
                FileStatus::Unchanged if verbose => pad("unchanged").dimmed(),
                FileStatus::Unchanged => continue,
            };
            println!(
                "{} {}: {}{}",
                label,
                file.path.display(),
                file.diagnostic,
                file.detail().dimmed()
            );
            if let Some(diff) = &file.diff {
                print_diff(diff);
            }
        }

        println!();
        let verb = if writes { "fixed" } else { "would fix" };
        let lines = if self.added + self.removed > 0 {
            format!(" (+{} -{} lines)", self.added, self.removed)
        } else {
            String::new()
        };
        println!(
            "{} {} {}, {} errors, {} skipped{}",
            "Summary:".bold(),
            self.fixed,
            verb,
            self.errors,
            self.skipped,
            lines
        );
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn pad(label: &str) -> String {
    format!("{label:>9}")
}

/// Print a unified diff with added and removed lines colored.
fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

/// Show `path` relative to `base` when it lives underneath it.
pub fn display_path(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
