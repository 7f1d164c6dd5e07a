//! Check command implementation

use std::path::Path;

use dockfix_content::NormalizeOptions;
use dockfix_fs::Config;
use tracing::debug;

use super::batch::{BatchOptions, Mode, effective_config, emit, run_batch};
use crate::cli::TargetArgs;
use crate::error::Result;

/// Run the check command and return the process exit code.
///
/// Exits with 1 when any file would change or could not be processed.
pub fn run_check(cwd: &Path, config: Config, targets: &TargetArgs, verbose: bool) -> Result<i32> {
    let config = effective_config(config, targets);

    let mut normalize = NormalizeOptions::new();
    if let Some(indent) = config.indent.clone() {
        normalize = normalize.with_indent(indent)?;
    }

    let mut options = BatchOptions::new(Mode::Preview, cwd);
    options.diff = targets.diff;
    options.normalize = normalize;
    debug!(paths = ?targets.paths, "running check");

    let report = run_batch(&targets.paths, &config, &options);
    emit(&report, targets, verbose, false)?;

    Ok(if report.has_errors() || report.has_changes() { 1 } else { 0 })
}
