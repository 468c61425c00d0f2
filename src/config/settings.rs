//! Settings Module
//!
//! User settings read from `settings.kdl`:
//!
//! ```kdl
//! verbose #false
//! timeout 300
//! managers "gem" "pip3"
//! search-paths "/opt/ruby/bin" "~/.local/bin"
//! ```

use crate::error::{MpmError, Result};
use crate::utils::paths;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const VALID_KEYS: [&str; 4] = ["verbose", "timeout", "managers", "search-paths"];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub verbose: bool,
    /// `None` lets manager processes run unbounded
    pub timeout: Option<Duration>,
    /// Restrict to these manager ids; empty means all registered ones
    pub managers: Vec<String>,
    /// Extra directories searched for manager CLIs before `PATH`
    pub search_paths: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            managers: Vec::new(),
            search_paths: Vec::new(),
        }
    }
}

impl Settings {
    /// Load from `path`, or the per-user settings file. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings_file = match path {
            Some(path) => path.to_path_buf(),
            None => paths::settings_file()?,
        };

        if !settings_file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&settings_file).map_err(|e| MpmError::IoError {
            path: settings_file.clone(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
            MpmError::ConfigError(format!("KDL parsing error in settings: {}", e))
        })?;

        let mut settings = Self::default();

        for node in doc.nodes() {
            match node.name().value() {
                "verbose" => settings.verbose = bool_value(node)?,
                "timeout" => {
                    let secs = integer_value(node)?;
                    settings.timeout = (secs > 0).then(|| Duration::from_secs(secs));
                }
                "managers" => settings.managers = string_values(node)?,
                "search-paths" => {
                    settings.search_paths = string_values(node)?
                        .iter()
                        .map(|p| paths::expand_home(Path::new(p)))
                        .collect::<Result<_>>()?;
                }
                other => {
                    return Err(MpmError::ConfigError(format!(
                        "Unknown setting: '{}'. Valid settings: {}",
                        other,
                        VALID_KEYS.join(", ")
                    )));
                }
            }
        }

        Ok(settings)
    }
}

fn bool_value(node: &KdlNode) -> Result<bool> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_bool())
        .ok_or_else(|| invalid_value(node, "#true or #false"))
}

fn integer_value(node: &KdlNode) -> Result<u64> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_integer())
        .and_then(|value| u64::try_from(value).ok())
        .ok_or_else(|| invalid_value(node, "a non-negative number of seconds"))
}

fn string_values(node: &KdlNode) -> Result<Vec<String>> {
    node.entries()
        .iter()
        .map(|entry| {
            entry
                .value()
                .as_string()
                .map(str::to_string)
                .ok_or_else(|| invalid_value(node, "quoted strings"))
        })
        .collect()
}

fn invalid_value(node: &KdlNode, expected: &str) -> MpmError {
    MpmError::ConfigError(format!(
        "Invalid value for '{}': expected {}",
        node.name().value(),
        expected
    ))
}

#[cfg(test)]
mod tests;
