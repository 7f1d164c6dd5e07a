//! Configuration: what to scan and how to indent

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_EXCLUDE_DIRS, DOCKERFILE};
use crate::{Error, Result, io};

/// dockfix settings, usually read from `.dockfix.toml`
///
/// ```toml
/// file_names = ["Dockerfile", "Containerfile"]
/// include_variants = true
/// exclude_dirs = [".git", "vendor"]
/// indent = "\t\t"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Exact file names treated as Dockerfiles
    pub file_names: Vec<String>,
    /// Also match `<name>.*` and `*.<name>` for each file name
    pub include_variants: bool,
    /// Directory names skipped during discovery
    pub exclude_dirs: Vec<String>,
    /// Forced indentation for package lines
    pub indent: Option<String>,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_names: vec![DOCKERFILE.to_string()],
            include_variants: true,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|d| d.to_string()).collect(),
            indent: None,
            follow_links: false,
        }
    }
}

impl Config {
    /// Load `.dockfix.toml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            ConfigStore::new().load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether a file name is a Dockerfile under this configuration.
    pub fn matches_file_name(&self, name: &str) -> bool {
        self.file_names.iter().any(|base| {
            name == base
                || (self.include_variants
                    && (name
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('.'))
                        || name
                            .strip_suffix(base.as_str())
                            .is_some_and(|rest| rest.len() > 1 && rest.ends_with('.'))))
        })
    }

    /// Whether a directory name is excluded from discovery.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Format-agnostic configuration loading.
///
/// The format is picked from the file extension.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: PathBuf::from(path),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}
