//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// dockfix - Repair scattered apt-get install blocks in Dockerfiles
#[derive(Parser, Debug)]
#[command(name = "dockfix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (.toml, .json, .yaml); defaults to ./.dockfix.toml
    #[arg(short, long, global = true, env = "DOCKFIX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Rewrite malformed install blocks in place
    ///
    /// Examples:
    ///   dockfix fix                     # Every Dockerfile under the current directory
    ///   dockfix fix images/ Dockerfile  # Specific directories and files
    ///   dockfix fix --dry-run --diff    # Preview the changes
    Fix {
        #[command(flatten)]
        targets: TargetArgs,

        /// Preview fixes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Indentation for package lines: `tab`, a number of spaces, or a literal string
        #[arg(long, value_parser = parse_indent, value_name = "INDENT")]
        indent: Option<String>,
    },

    /// Report files that need fixing without touching them
    ///
    /// Exits with status 1 when any file would change or could not be read.
    Check {
        #[command(flatten)]
        targets: TargetArgs,
    },
}

/// Which files to process and how to report them
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Files or directories to process
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Directory name to skip while searching (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Show a unified diff for every file that changes
    #[arg(long)]
    pub diff: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse an `--indent` value.
fn parse_indent(value: &str) -> Result<String, String> {
    if value.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    if let Ok(width) = value.parse::<usize>() {
        return match width {
            0 => Err("indent width must be at least 1".to_string()),
            n => Ok(" ".repeat(n)),
        };
    }
    Ok(value.replace("\\t", "\t"))
}
