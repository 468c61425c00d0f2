//! Package Manager Contract
//!
//! [`Manager`] wraps a plugin's [`ManagerSpec`] with everything the plugins
//! share: CLI discovery, process invocation through the injected
//! [`CommandRunner`], line-by-line parsing and per-instance caching.
//!
//! `cli_path`, `get_version`, `installed` and `outdated` are computed on
//! first access and kept for the lifetime of the instance; a fresh result
//! needs a fresh instance. Operations on a manager whose CLI was not found
//! fail fast with [`MpmError::ManagerUnavailable`] instead of spawning
//! anything.

use crate::core::{ManagerState, Memo, PackageMap, Platform, Version};
use crate::error::{MpmError, Result};
use crate::locator::CliLocator;
use crate::packages::traits::ManagerSpec;
use crate::parsers;
use crate::process::CommandRunner;
use crate::ui;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Manager {
    spec: Box<dyn ManagerSpec>,
    runner: Arc<dyn CommandRunner>,
    locator: CliLocator,
    cli_path: Memo<Option<PathBuf>>,
    version: Memo<Version>,
    installed: Memo<PackageMap>,
    outdated: Memo<PackageMap>,
}

impl Manager {
    pub fn new<S>(spec: S, runner: Arc<dyn CommandRunner>) -> Self
    where
        S: ManagerSpec + 'static,
    {
        Self::from_boxed(Box::new(spec), runner)
    }

    pub fn from_boxed(spec: Box<dyn ManagerSpec>, runner: Arc<dyn CommandRunner>) -> Self {
        let locator = CliLocator::new(spec.search_dirs());
        Self {
            spec,
            runner,
            locator,
            cli_path: Memo::new(),
            version: Memo::new(),
            installed: Memo::new(),
            outdated: Memo::new(),
        }
    }

    /// Use a custom locator for CLI discovery
    pub fn with_locator(mut self, locator: CliLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Also look in `dirs` before falling back to `PATH`
    pub fn with_extra_search_dirs(mut self, dirs: &[PathBuf]) -> Self {
        self.locator = self.locator.with_extra_dirs(dirs.iter().cloned());
        self
    }

    /// Skip discovery and pin the CLI path (or its absence)
    pub fn with_cli_path(self, cli_path: Option<PathBuf>) -> Self {
        self.cli_path.get_or_init(|| cli_path);
        self
    }

    pub fn id(&self) -> &str {
        self.spec.id()
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn platforms(&self) -> &[Platform] {
        self.spec.platforms()
    }

    pub fn requirement(&self) -> &str {
        self.spec.requirement()
    }

    pub fn global_args(&self) -> &[&'static str] {
        self.spec.global_args()
    }

    pub fn supports_platform(&self, platform: Platform) -> bool {
        self.spec.platforms().contains(&platform)
    }

    /// Resolved CLI location, looked up once. `None` means unavailable.
    pub fn cli_path(&self) -> Option<&Path> {
        self.cli_path
            .get_or_init(|| self.locator.locate(self.spec.cli_name()))
            .as_deref()
    }

    pub fn state(&self) -> ManagerState {
        match self.cli_path.get() {
            None => ManagerState::Unconfigured,
            Some(Some(_)) => ManagerState::Available,
            Some(None) => ManagerState::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.cli_path().is_some()
    }

    fn require_cli(&self) -> Result<&Path> {
        self.cli_path()
            .ok_or_else(|| MpmError::ManagerUnavailable {
                manager: self.spec.name().to_string(),
            })
    }

    fn argv(&self, cli: &Path, args: Vec<String>) -> Vec<String> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(cli.to_string_lossy().into_owned());
        argv.extend(args);
        argv
    }

    fn run(&self, args: Vec<String>) -> Result<String> {
        let cli = self.require_cli()?;
        let argv = self.argv(cli, args);
        self.runner.run(&argv)
    }

    /// Version the CLI reports about itself
    pub fn get_version(&self) -> Result<&Version> {
        self.version.get_or_try_init(|| {
            let output = self.run(self.spec.version_args())?;
            self.spec.parse_version(&output)
        })
    }

    /// Whether the installed CLI is at least the plugin's minimum version.
    ///
    /// Informational: nothing in this crate refuses to run an older CLI.
    pub fn meets_requirement(&self) -> Result<bool> {
        let required = Version::parse(self.spec.requirement())?;
        Ok(*self.get_version()? >= required)
    }

    pub fn installed(&self) -> Result<&PackageMap> {
        self.installed.get_or_try_init(|| {
            let output = self.run(self.spec.installed_args())?;
            let packages =
                parsers::parse_lines(&output, |line| self.spec.parse_installed_line(line))?;
            ui::debug(&format!("{}: {} installed package(s)", self.name(), packages.len()));
            Ok(packages)
        })
    }

    pub fn outdated(&self) -> Result<&PackageMap> {
        self.outdated.get_or_try_init(|| {
            let output = self.run(self.spec.outdated_args())?;
            let packages =
                parsers::parse_lines(&output, |line| self.spec.parse_outdated_line(line))?;
            ui::debug(&format!("{}: {} outdated package(s)", self.name(), packages.len()));
            Ok(packages)
        })
    }

    /// Query the remote index. Not cached: each query is its own call.
    pub fn search(&self, query: &str) -> Result<PackageMap> {
        let output = self.run(self.spec.search_args(query))?;
        parsers::parse_lines(&output, |line| self.spec.parse_search_line(line, query))
    }

    /// Command line upgrading `package_id`, or everything when `None`.
    ///
    /// Nothing is executed. A tool without bulk upgrade yields
    /// [`MpmError::Unsupported`], never an empty command.
    pub fn upgrade_cli(&self, package_id: Option<&str>) -> Result<Vec<String>> {
        let args = self.spec.upgrade_args(package_id)?;
        let cli = self.require_cli()?;
        Ok(self.argv(cli, args))
    }

    pub fn upgrade_all_cli(&self) -> Result<Vec<String>> {
        self.upgrade_cli(None)
    }

    /// Run the manager's native maintenance command, if it has one
    pub fn cleanup(&self) -> Result<()> {
        let Some(args) = self.spec.cleanup_args() else {
            ui::debug(&format!("{} has no cleanup operation", self.name()));
            return Ok(());
        };
        self.run(args)?;
        Ok(())
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("state", &self.state())
            .finish()
    }
}
