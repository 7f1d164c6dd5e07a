//! Names dockfix looks for on disk.

/// Canonical Dockerfile name
pub const DOCKERFILE: &str = "Dockerfile";

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".dockfix.toml";

/// Directories never descended into by default
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", ".hg", ".svn", "node_modules", "target"];
