use crate::core::version::Version;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One package as reported by a single manager.
///
/// Records are scoped to the manager that produced them; the same library
/// seen by two managers is two unrelated records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    /// Manager-local key
    pub id: String,
    /// Display name, may carry a non-standard install location in parentheses
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<Version>,
    /// Search results only: whether the query matched the id exactly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

impl Package {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            installed_version: None,
            latest_version: None,
            exact: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn installed(mut self, version: Version) -> Self {
        self.installed_version = Some(version);
        self
    }

    pub fn latest(mut self, version: Version) -> Self {
        self.latest_version = Some(version);
        self
    }

    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = Some(exact);
        self
    }
}

/// Package id -> record, ordered by id for stable output
pub type PackageMap = BTreeMap<String, Package>;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    MacOS,
    Windows,
}

impl Platform {
    /// Platform this binary was built for, if it is one we know about
    pub fn current() -> Option<Platform> {
        if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Platform::MacOS)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOS => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Externally observable lifecycle of a manager instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerState {
    /// No CLI lookup attempted yet
    Unconfigured,
    /// CLI located
    Available,
    /// CLI not found on this host
    Unavailable,
}

impl fmt::Display for ManagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "unconfigured"),
            Self::Available => write!(f, "available"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}
