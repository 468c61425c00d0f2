use crate::core::{Package, Platform, Version};
use crate::error::Result;
use std::path::PathBuf;

/// What a manager plugin has to provide.
///
/// A plugin is pure data and grammar: its CLI name, argument lists, and the
/// per-line parsing rules for each operation. Locating the CLI, spawning
/// processes and caching results are done once for everyone by
/// [`Manager`](crate::packages::Manager).
///
/// Argument lists never include the CLI path; the manager prepends it.
pub trait ManagerSpec: Send + Sync {
    /// Registry key (`gem`, `pip3`, ...)
    fn id(&self) -> &str;

    /// Human label
    fn name(&self) -> &str;

    /// Executable looked up on the search path
    fn cli_name(&self) -> &str;

    fn platforms(&self) -> &[Platform];

    /// Minimum supported CLI version
    fn requirement(&self) -> &str;

    /// Arguments added to every operation invocation
    fn global_args(&self) -> &[&'static str] {
        &[]
    }

    /// Install directories searched before `PATH`
    fn search_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// `args` followed by the global arguments
    fn command_args(&self, args: &[&str]) -> Vec<String> {
        args.iter()
            .chain(self.global_args().iter())
            .map(|arg| arg.to_string())
            .collect()
    }

    fn version_args(&self) -> Vec<String> {
        vec!["--version".to_string()]
    }

    fn parse_version(&self, output: &str) -> Result<Version>;

    fn installed_args(&self) -> Vec<String>;

    fn parse_installed_line(&self, line: &str) -> Result<Option<Package>>;

    fn outdated_args(&self) -> Vec<String>;

    fn parse_outdated_line(&self, line: &str) -> Result<Option<Package>>;

    fn search_args(&self, query: &str) -> Vec<String>;

    fn parse_search_line(&self, line: &str, query: &str) -> Result<Option<Package>>;

    /// Arguments upgrading `package_id`, or everything when `None`.
    ///
    /// Returns [`MpmError::Unsupported`](crate::error::MpmError::Unsupported)
    /// when the tool has no bulk upgrade.
    fn upgrade_args(&self, package_id: Option<&str>) -> Result<Vec<String>>;

    /// Native maintenance command, `None` when the tool has none
    fn cleanup_args(&self) -> Option<Vec<String>> {
        None
    }
}
