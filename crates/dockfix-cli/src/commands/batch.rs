//! Batch driver shared by `fix` and `check`
//!
//! Every file is processed on its own: a read or write failure becomes an
//! error line in the report and the remaining files are still handled.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use dockfix_content::{
    NormalizeOptions, Outcome, TextChange, find_blocks, normalize_with, unified_diff,
};
use dockfix_fs::{Config, discover, io};

use crate::cli::TargetArgs;
use crate::error::Result;
use crate::report::{BatchReport, BlockSummary, FileReport, FileStatus, display_path};

/// Whether a run may touch files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite changed files
    Write,
    /// Compute changes, write nothing
    Preview,
}

/// Settings for one batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub mode: Mode,
    pub diff: bool,
    pub normalize: NormalizeOptions,
    /// Paths in the report are shown relative to this directory
    pub base: PathBuf,
}

impl BatchOptions {
    pub fn new(mode: Mode, base: &Path) -> Self {
        Self {
            mode,
            diff: false,
            normalize: NormalizeOptions::default(),
            base: canonical_base(base),
        }
    }
}

/// Canonical form of `base`, matching the paths discovery returns.
fn canonical_base(base: &Path) -> PathBuf {
    dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf())
}

/// Merge command-line targets into the loaded configuration.
pub fn effective_config(mut config: Config, targets: &TargetArgs) -> Config {
    for dir in &targets.exclude {
        if !config.is_excluded_dir(dir) {
            config.exclude_dirs.push(dir.clone());
        }
    }
    config
}

/// Discover files under `paths` and process each one.
pub fn run_batch(paths: &[PathBuf], config: &Config, options: &BatchOptions) -> BatchReport {
    let resolved: Vec<PathBuf> = paths
        .iter()
        .map(|p| if p.is_absolute() { p.clone() } else { options.base.join(p) })
        .collect();
    let discovery = discover(&resolved, config);
    let mut report = BatchReport::default();

    for error in &discovery.errors {
        let path = error.path().map(Path::to_path_buf).unwrap_or_default();
        warn!(path = %path.display(), %error, "cannot search path");
        report.push(FileReport::error(display_path(&path, &options.base), error));
    }

    for file in &discovery.files {
        report.push(process_file(file, options));
    }

    info!(
        fixed = report.fixed,
        errors = report.errors,
        skipped = report.skipped,
        "batch finished"
    );
    report
}

/// Normalize one file, converting any I/O failure into an error report.
pub fn process_file(path: &Path, options: &BatchOptions) -> FileReport {
    let shown = display_path(path, &options.base);
    match try_process_file(path, &shown, options) {
        Ok(report) => report,
        Err(error) => {
            warn!(path = %shown.display(), %error, "failed to process file");
            FileReport::error(shown, &error)
        }
    }
}

fn try_process_file(
    path: &Path,
    shown: &Path,
    options: &BatchOptions,
) -> dockfix_fs::Result<FileReport> {
    let source = io::read_text(path)?;
    let result = normalize_with(&source, &options.normalize);

    if result.outcome == Outcome::NoPackages {
        warn!(
            path = %shown.display(),
            "install block without recognizable packages, review by hand"
        );
    }

    let status = match (result.changed, options.mode) {
        (false, _) => FileStatus::Unchanged,
        (true, Mode::Write) => {
            io::write_text(path, &result.text)?;
            FileStatus::Fixed
        }
        (true, Mode::Preview) => FileStatus::WouldFix,
    };
    info!(path = %shown.display(), ?status, diagnostic = %result.outcome, "processed");

    let diff = (options.diff && result.changed)
        .then(|| unified_diff(&source, &result.text, &shown.to_string_lossy()));
    let change = TextChange::compute(&source, &result.text);

    Ok(FileReport {
        path: shown.to_path_buf(),
        status,
        diagnostic: result.diagnostic(),
        packages: result.packages(),
        misplaced: result.misplaced(),
        added: change.added,
        removed: change.removed,
        blocks: find_blocks(&source).iter().map(BlockSummary::from).collect(),
        diff,
    })
}

/// Print the report in the requested format.
pub fn emit(report: &BatchReport, targets: &TargetArgs, verbose: bool, writes: bool) -> Result<()> {
    if targets.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_human(verbose, writes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BROKEN: &str = "FROM debian:12\nRUN apt-get update \\\n    && apt-get install -y --no-install-recommends \\\n    && apt-get clean \\\n    && rm -rf /var/lib/apt/lists/*\n        curl \\\n        git\n";

    fn targets() -> TargetArgs {
        TargetArgs {
            paths: vec![PathBuf::from(".")],
            exclude: Vec::new(),
            diff: false,
            json: false,
        }
    }

    #[test]
    fn test_process_file_writes_fix() {
        let temp = TempDir::new().unwrap();
        let options = BatchOptions::new(Mode::Write, temp.path());
        let path = options.base.join("Dockerfile");
        fs::write(&path, BROKEN).unwrap();

        let report = process_file(&path, &options);

        assert_eq!(report.status, FileStatus::Fixed);
        assert_eq!(report.packages, 2);
        assert_eq!(report.misplaced, 2);
        assert_eq!(report.path, PathBuf::from("Dockerfile"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("recommends \\\n        curl \\\n        git \\\n    && apt-get clean"));
    }

    #[test]
    fn test_preview_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Dockerfile");
        fs::write(&path, BROKEN).unwrap();

        let mut options = BatchOptions::new(Mode::Preview, temp.path());
        options.diff = true;
        let report = process_file(&path, &options);

        assert_eq!(report.status, FileStatus::WouldFix);
        assert!(report.diff.as_deref().unwrap().contains("+        git \\"));
        assert_eq!(fs::read_to_string(&path).unwrap(), BROKEN);
    }

    #[test]
    fn test_report_counts_lines_and_blocks() {
        let temp = TempDir::new().unwrap();
        let options = BatchOptions::new(Mode::Preview, temp.path());
        let path = options.base.join("Dockerfile");
        fs::write(&path, BROKEN).unwrap();

        let report = process_file(&path, &options);

        assert_eq!((report.added, report.removed), (2, 2));
        assert_eq!(
            report.blocks,
            vec![BlockSummary {
                start_line: 3,
                end_line: 7,
                packages: 2,
                misplaced: 2,
            }]
        );
    }

    #[test]
    fn test_unreadable_file_does_not_stop_batch() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a/Dockerfile"), [0xffu8, 0xfe]).unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        fs::write(temp.path().join("b/Dockerfile"), BROKEN).unwrap();

        let options = BatchOptions::new(Mode::Write, temp.path());
        let report = run_batch(&[PathBuf::from(".")], &Config::default(), &options);

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.fixed, 1);
        assert_eq!(report.files[0].status, FileStatus::Error);
        assert_eq!(report.files[1].status, FileStatus::Fixed);
    }

    #[test]
    fn test_effective_config_adds_excludes_once() {
        let mut args = targets();
        args.exclude = vec!["vendor".into(), ".git".into()];

        let config = effective_config(Config::default(), &args);

        assert_eq!(config.exclude_dirs.iter().filter(|d| *d == ".git").count(), 1);
        assert!(config.is_excluded_dir("vendor"));
    }
}
