//! pip, in its generic, Python 2 and Python 3 flavours
//!
//! All flavours share one grammar, pip's legacy list format:
//!
//! ```text
//! $ pip list --format=legacy
//! docutils (0.13.1)
//! meta-package-manager (2.4.0, /home/kev/venvs/meta-package-manager)
//!
//! $ pip list --outdated --format=legacy
//! ccm (2.1.8, /Users/kdeldycke/ccm) - Latest: 2.1.11 [sdist]
//! mccabe (0.4.0) - Latest: 0.5.0 [wheel]
//! ```
//!
//! A second field inside the parentheses is a non-standard install
//! location; it is kept in the display name, never in the id.
//!
//! `--format=legacy` exists in pip 9.x only: pip 10 removed it. Only pip 9
//! is supported, and on a newer pip `installed` and `outdated` fail with
//! `CommandExit`. `meets_requirement` checks the lower bound alone.

use crate::core::{Package, Platform, Version};
use crate::error::{MpmError, Result};
use crate::packages::traits::ManagerSpec;
use crate::parsers::{self, LinePattern};

const INSTALLED: LinePattern = LinePattern::new(r"^(\S+) \((.*)\)");
const OUTDATED: LinePattern = LinePattern::new(r"^(\S+) \((.*)\) - Latest: (\S+)");
const SEARCH: LinePattern = LinePattern::new(r"^(\S+) \((\S+)\)\s+- ");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipFlavor {
    /// Whatever `pip` is first on the search path
    #[default]
    Default,
    Python2,
    Python3,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pip {
    flavor: PipFlavor,
}

impl Pip {
    pub fn new(flavor: PipFlavor) -> Self {
        Self { flavor }
    }

    /// Global arguments go before the subcommand for pip
    fn pip_args(&self, args: &[&str]) -> Vec<String> {
        self.global_args()
            .iter()
            .chain(args.iter())
            .map(|arg| arg.to_string())
            .collect()
    }

    /// `"2.1.8, /Users/k/ccm"` -> version plus annotated display name
    fn installed_info(id: &str, info: &str) -> Option<(String, Version)> {
        let (version, location) = parsers::split_location(info);
        let version = Version::parse(version).ok()?;
        Some((parsers::annotate_name(id, location), version))
    }
}

impl ManagerSpec for Pip {
    fn id(&self) -> &str {
        match self.flavor {
            PipFlavor::Default => "pip",
            PipFlavor::Python2 => "pip2",
            PipFlavor::Python3 => "pip3",
        }
    }

    fn name(&self) -> &str {
        match self.flavor {
            PipFlavor::Default => "Pip",
            PipFlavor::Python2 => "Python 2's Pip",
            PipFlavor::Python3 => "Python 3's Pip",
        }
    }

    fn cli_name(&self) -> &str {
        self.id()
    }

    fn platforms(&self) -> &[Platform] {
        &[Platform::MacOS, Platform::Linux]
    }

    /// First release with `--format=legacy`, which pip 10 dropped again
    fn requirement(&self) -> &str {
        "9.0.0"
    }

    fn global_args(&self) -> &[&'static str] {
        &["--disable-pip-version-check"]
    }

    /// `pip 9.0.1 from /usr/lib/python3/dist-packages (python 3.6)`
    fn parse_version(&self, output: &str) -> Result<Version> {
        let token = output
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| MpmError::InvalidVersion(output.trim().to_string()))?;
        Version::parse(token)
    }

    fn installed_args(&self) -> Vec<String> {
        self.pip_args(&["list", "--format=legacy"])
    }

    fn parse_installed_line(&self, line: &str) -> Result<Option<Package>> {
        let Some(caps) = INSTALLED.captures(line)? else {
            return Ok(None);
        };
        let id = parsers::group(&caps, 1);
        let Some((name, version)) = Self::installed_info(id, parsers::group(&caps, 2)) else {
            return Ok(None);
        };

        Ok(Some(Package::new(id).with_name(name).installed(version)))
    }

    fn outdated_args(&self) -> Vec<String> {
        self.pip_args(&["list", "--outdated", "--format=legacy"])
    }

    /// The trailing `[wheel]`/`[sdist]` hint is never captured
    fn parse_outdated_line(&self, line: &str) -> Result<Option<Package>> {
        let Some(caps) = OUTDATED.captures(line)? else {
            return Ok(None);
        };
        let id = parsers::group(&caps, 1);
        let Some((name, current)) = Self::installed_info(id, parsers::group(&caps, 2)) else {
            return Ok(None);
        };
        let Ok(latest) = Version::parse(parsers::group(&caps, 3)) else {
            return Ok(None);
        };

        Ok(Some(
            Package::new(id)
                .with_name(name)
                .installed(current)
                .latest(latest),
        ))
    }

    fn search_args(&self, query: &str) -> Vec<String> {
        self.pip_args(&["search", query])
    }

    /// `mccabe (0.6.1)  - McCabe checker, plugin for flake8`
    fn parse_search_line(&self, line: &str, query: &str) -> Result<Option<Package>> {
        let Some(caps) = SEARCH.captures(line)? else {
            return Ok(None);
        };
        let id = parsers::group(&caps, 1);
        let Ok(latest) = Version::parse(parsers::group(&caps, 2)) else {
            return Ok(None);
        };

        Ok(Some(
            Package::new(id)
                .latest(latest)
                .exact(parsers::exact_match(query, id)),
        ))
    }

    /// pip has no "upgrade everything": https://github.com/pypa/pip/issues/59
    fn upgrade_args(&self, package_id: Option<&str>) -> Result<Vec<String>> {
        let Some(package_id) = package_id else {
            return Err(MpmError::Unsupported {
                manager: self.name().to_string(),
                operation: "bulk upgrade".to_string(),
            });
        };
        Ok(self.pip_args(&["install", "--upgrade", package_id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_line() {
        let pkg = Pip::default()
            .parse_installed_line("docutils (0.13.1)")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.id, "docutils");
        assert_eq!(pkg.name, "docutils");
        assert_eq!(pkg.installed_version.unwrap().as_str(), "0.13.1");
    }

    #[test]
    fn test_installed_keeps_non_standard_location_in_name() {
        let pkg = Pip::default()
            .parse_installed_line("meta-package-manager (2.4.0, /home/kev/venvs/meta-package-manager)")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.id, "meta-package-manager");
        assert_eq!(
            pkg.name,
            "meta-package-manager (/home/kev/venvs/meta-package-manager)"
        );
        assert_eq!(pkg.installed_version.unwrap().as_str(), "2.4.0");
    }

    #[test]
    fn test_installed_irregular_version() {
        let pkg = Pip::default()
            .parse_installed_line("html5lib (0.9999999)")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.installed_version.unwrap().as_str(), "0.9999999");
    }

    #[test]
    fn test_installed_skips_noise() {
        let pip = Pip::default();
        assert!(pip.parse_installed_line("").unwrap().is_none());
        assert!(pip.parse_installed_line("Package    Version").unwrap().is_none());
        assert!(pip.parse_installed_line("broken ()").unwrap().is_none());
    }

    #[test]
    fn test_outdated_discards_format_hint() {
        let pkg = Pip::default()
            .parse_outdated_line("mccabe (0.4.0) - Latest: 0.5.0 [wheel]")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.id, "mccabe");
        assert_eq!(pkg.name, "mccabe");
        assert_eq!(pkg.installed_version.unwrap().as_str(), "0.4.0");
        assert_eq!(pkg.latest_version.unwrap().as_str(), "0.5.0");
    }

    #[test]
    fn test_outdated_with_location() {
        let pkg = Pip::default()
            .parse_outdated_line("ccm (2.1.8, /Users/kdeldycke/ccm) - Latest: 2.1.11 [sdist]")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.id, "ccm");
        assert_eq!(pkg.name, "ccm (/Users/kdeldycke/ccm)");
        assert_eq!(pkg.installed_version.unwrap().as_str(), "2.1.8");
        assert_eq!(pkg.latest_version.unwrap().as_str(), "2.1.11");
    }

    #[test]
    fn test_outdated_skips_installed_rows() {
        assert!(Pip::default()
            .parse_outdated_line("docutils (0.13.1)")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_search_line() {
        let pip = Pip::default();
        let pkg = pip
            .parse_search_line("mccabe (0.6.1)  - McCabe checker, plugin for flake8", "mccabe")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.latest_version.unwrap().as_str(), "0.6.1");
        assert_eq!(pkg.exact, Some(true));

        assert!(pip
            .parse_search_line("  INSTALLED: 0.6.1 (latest)", "mccabe")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_bulk_upgrade_is_unsupported() {
        let err = Pip::default().upgrade_args(None).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_single_upgrade_args() {
        assert_eq!(
            Pip::default().upgrade_args(Some("mccabe")).unwrap(),
            vec!["--disable-pip-version-check", "install", "--upgrade", "mccabe"]
        );
    }

    #[test]
    fn test_parse_version() {
        let out = "pip 9.0.1 from /usr/lib/python3/dist-packages (python 3.6)\n";
        assert_eq!(Pip::default().parse_version(out).unwrap().as_str(), "9.0.1");
        assert!(Pip::default().parse_version("pip").is_err());
        assert!(matches!(
            Pip::default().parse_version("WARNING: pip is being invoked by an old script wrapper"),
            Err(MpmError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_flavors() {
        let pip3 = Pip::new(PipFlavor::Python3);
        assert_eq!(pip3.id(), "pip3");
        assert_eq!(pip3.cli_name(), "pip3");
        assert_eq!(pip3.name(), "Python 3's Pip");
        assert_eq!(Pip::new(PipFlavor::Python2).name(), "Python 2's Pip");
        assert!(pip3.cleanup_args().is_none());
    }
}
