use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpmError {
    /// The manager CLI could not be located on this host
    #[error("{manager} is not available on this host (CLI not found)")]
    ManagerUnavailable { manager: String },

    /// The underlying tool has no equivalent of the requested operation
    #[error("{manager} does not support {operation}")]
    Unsupported { manager: String, operation: String },

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Command '{command}' exited with {}: {stderr}", exit_label(.code))]
    CommandExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Invalid version string: '{0}'")]
    InvalidVersion(String),

    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    #[error("Unknown package manager: {0}")]
    UnknownManager(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl MpmError {
    /// True for the "tool cannot do this" signal, as opposed to a failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, MpmError::Unsupported { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, MpmError::ManagerUnavailable { .. })
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, MpmError>;
