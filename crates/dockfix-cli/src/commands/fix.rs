//! Fix command implementation

use std::path::Path;

use dockfix_content::NormalizeOptions;
use dockfix_fs::Config;
use tracing::debug;

use super::batch::{BatchOptions, Mode, effective_config, emit, run_batch};
use crate::cli::TargetArgs;
use crate::error::Result;

/// Run the fix command and return the process exit code.
///
/// `indent` from the command line takes precedence over the configured one.
pub fn run_fix(
    cwd: &Path,
    config: Config,
    targets: &TargetArgs,
    dry_run: bool,
    indent: Option<String>,
    verbose: bool,
) -> Result<i32> {
    let config = effective_config(config, targets);

    let mut normalize = NormalizeOptions::new();
    if let Some(indent) = indent.or_else(|| config.indent.clone()) {
        normalize = normalize.with_indent(indent)?;
    }

    let mode = if dry_run { Mode::Preview } else { Mode::Write };
    let mut options = BatchOptions::new(mode, cwd);
    options.diff = targets.diff;
    options.normalize = normalize;
    debug!(?mode, paths = ?targets.paths, "running fix");

    let report = run_batch(&targets.paths, &config, &options);
    emit(&report, targets, verbose, mode == Mode::Write)?;

    Ok(if report.has_errors() { 1 } else { 0 })
}
