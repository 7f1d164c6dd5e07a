//! dockfix CLI
//!
//! Finds Dockerfiles whose `apt-get install` package list ended up below the
//! apt cleanup commands and moves the packages back where they belong.

mod cli;
mod commands;
mod error;
mod logging;
mod report;

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use dockfix_fs::{Config, ConfigStore};
use error::{CliError, Result};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Dockerfile install block fixer", "dockfix".green().bold());
        println!();
        println!("Run {} for available commands.", "dockfix --help".cyan());
        return Ok(0);
    };

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    match command {
        Commands::Fix {
            targets,
            dry_run,
            indent,
        } => commands::run_fix(&cwd, config, &targets, dry_run, indent, cli.verbose),
        Commands::Check { targets } => commands::run_check(&cwd, config, &targets, cli.verbose),
    }
}

/// Explicit `--config` file, else `.dockfix.toml` in the working directory.
fn load_config(cwd: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(CliError::user(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "loading config");
            Ok(ConfigStore::new().load(&path)?)
        }
        None => Ok(Config::discover(cwd)?),
    }
}
