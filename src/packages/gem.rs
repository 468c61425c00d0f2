//! RubyGems
//!
//! Sample `gem list` output:
//!
//! ```text
//! *** LOCAL GEMS ***
//!
//! bigdecimal (default: 1.4.1)
//! fileutils (1.4.1, default: 1.1.0)
//! molinillo (0.5.4, 0.4.5, 0.2.3)
//! test-unit (2.0.0.0)
//! ```
//!
//! `gem outdated` prints `json (1.8.3 < 2.0.1)` and `gem search` prints
//! `logstash-filter-python (0.0.1 java)`.

use crate::core::{Package, Platform, Version};
use crate::error::Result;
use crate::packages::traits::ManagerSpec;
use crate::parsers::{self, LinePattern};
use std::path::PathBuf;

const INSTALLED: LinePattern = LinePattern::new(r"^(\S+) \((.+)\)");
const OUTDATED: LinePattern = LinePattern::new(r"^(\S+) \((\S+) < (\S+)\)");
const SEARCH: LinePattern = LinePattern::new(r"^(\S+) \((.+)\)");

#[derive(Debug, Clone, Copy, Default)]
pub struct Gem;

impl ManagerSpec for Gem {
    fn id(&self) -> &str {
        "gem"
    }

    fn name(&self) -> &str {
        "Ruby Gems"
    }

    fn cli_name(&self) -> &str {
        "gem"
    }

    fn platforms(&self) -> &[Platform] {
        &[Platform::Linux, Platform::MacOS, Platform::Windows]
    }

    /// gem bundled with the oldest macOS release still supported
    fn requirement(&self) -> &str {
        "2.5.0"
    }

    fn global_args(&self) -> &[&'static str] {
        // Silences the progress meter
        &["--quiet"]
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        vec![
            PathBuf::from("/usr/local/opt/ruby/bin"),
            PathBuf::from("/usr/local/bin"),
        ]
    }

    fn parse_version(&self, output: &str) -> Result<Version> {
        Version::parse(output.lines().next().unwrap_or(""))
    }

    fn installed_args(&self) -> Vec<String> {
        self.command_args(&["list"])
    }

    /// Several versions can sit side by side; the highest one wins,
    /// `default:` bundled versions included.
    fn parse_installed_line(&self, line: &str) -> Result<Option<Package>> {
        let Some(caps) = INSTALLED.captures(line)? else {
            return Ok(None);
        };
        let id = parsers::group(&caps, 1);
        let Some(version) = Version::max_of(parsers::version_tokens(parsers::group(&caps, 2)))
        else {
            return Ok(None);
        };

        Ok(Some(Package::new(id).installed(version)))
    }

    fn outdated_args(&self) -> Vec<String> {
        self.command_args(&["outdated"])
    }

    fn parse_outdated_line(&self, line: &str) -> Result<Option<Package>> {
        let Some(caps) = OUTDATED.captures(line)? else {
            return Ok(None);
        };
        let (Ok(current), Ok(latest)) = (
            Version::parse(parsers::group(&caps, 2)),
            Version::parse(parsers::group(&caps, 3)),
        ) else {
            return Ok(None);
        };

        Ok(Some(
            Package::new(parsers::group(&caps, 1))
                .installed(current)
                .latest(latest),
        ))
    }

    fn search_args(&self, query: &str) -> Vec<String> {
        self.command_args(&["search", query])
    }

    fn parse_search_line(&self, line: &str, query: &str) -> Result<Option<Package>> {
        let Some(caps) = SEARCH.captures(line)? else {
            return Ok(None);
        };
        let id = parsers::group(&caps, 1);
        // Remote index reports the newest release first
        let Some(latest) = parsers::version_tokens(parsers::group(&caps, 2))
            .first()
            .and_then(|token| Version::parse(token).ok())
        else {
            return Ok(None);
        };

        Ok(Some(
            Package::new(id)
                .latest(latest)
                .exact(parsers::exact_match(query, id)),
        ))
    }

    fn upgrade_args(&self, package_id: Option<&str>) -> Result<Vec<String>> {
        // System ruby needs sudo here; that is left to whoever runs the command
        let mut args = self.command_args(&["update", "--user-install"]);
        if let Some(package_id) = package_id {
            args.push(package_id.to_string());
        }
        Ok(args)
    }

    fn cleanup_args(&self) -> Option<Vec<String>> {
        Some(self.command_args(&["cleanup"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MpmError;

    fn installed(line: &str) -> Option<Package> {
        Gem.parse_installed_line(line).expect("valid pattern")
    }

    #[test]
    fn test_multi_version_collapses_to_latest() {
        let pkg = installed("fileutils (1.4.1, default: 1.1.0)").unwrap();
        assert_eq!(pkg.id, "fileutils");
        assert_eq!(pkg.name, "fileutils");
        assert_eq!(pkg.installed_version.unwrap().as_str(), "1.4.1");
    }

    #[test]
    fn test_default_only_version() {
        let pkg = installed("bigdecimal (default: 1.4.1)").unwrap();
        assert_eq!(pkg.installed_version.unwrap().as_str(), "1.4.1");
    }

    #[test]
    fn test_side_by_side_versions() {
        let pkg = installed("molinillo (0.5.4, 0.4.5, 0.2.3)").unwrap();
        assert_eq!(pkg.installed_version.unwrap().as_str(), "0.5.4");

        let pkg = installed("io-console (0.5.6, default: 0.4.7)").unwrap();
        assert_eq!(pkg.installed_version.unwrap().as_str(), "0.5.6");
    }

    #[test]
    fn test_four_segment_version() {
        let pkg = installed("test-unit (2.0.0.0)").unwrap();
        assert_eq!(pkg.installed_version.unwrap().as_str(), "2.0.0.0");
    }

    #[test]
    fn test_non_data_lines_are_skipped() {
        assert!(installed("*** LOCAL GEMS ***").is_none());
        assert!(installed("").is_none());
        assert!(installed("weird (no version here)").is_none());
    }

    #[test]
    fn test_outdated_line() {
        let pkg = Gem
            .parse_outdated_line("did_you_mean (1.0.0 < 1.0.2)")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.id, "did_you_mean");
        assert_eq!(pkg.installed_version.unwrap().as_str(), "1.0.0");
        assert_eq!(pkg.latest_version.unwrap().as_str(), "1.0.2");
        assert!(pkg.exact.is_none());
    }

    #[test]
    fn test_outdated_ignores_installed_rows() {
        assert!(Gem.parse_outdated_line("rake (0.9.6)").unwrap().is_none());
    }

    #[test]
    fn test_search_line_with_platform_suffix() {
        let pkg = Gem
            .parse_search_line("logstash-filter-python (0.0.1 java)", "python")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.latest_version.unwrap().as_str(), "0.0.1");
        assert_eq!(pkg.exact, Some(false));
        assert!(pkg.installed_version.is_none());
    }

    #[test]
    fn test_search_exact_flag() {
        let pkg = Gem
            .parse_search_line("python (0.2)", "python")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.exact, Some(true));
    }

    #[test]
    fn test_command_args_append_global_args() {
        assert_eq!(Gem.installed_args(), vec!["list", "--quiet"]);
        assert_eq!(Gem.outdated_args(), vec!["outdated", "--quiet"]);
        assert_eq!(Gem.search_args("rails"), vec!["search", "rails", "--quiet"]);
        assert_eq!(Gem.cleanup_args(), Some(vec!["cleanup".into(), "--quiet".into()]));
    }

    #[test]
    fn test_upgrade_args() {
        assert_eq!(
            Gem.upgrade_args(Some("rake")).unwrap(),
            vec!["update", "--user-install", "--quiet", "rake"]
        );
        assert_eq!(
            Gem.upgrade_args(None).unwrap(),
            vec!["update", "--user-install", "--quiet"]
        );
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(Gem.parse_version("3.0.3\n").unwrap().as_str(), "3.0.3");
        assert!(Gem.parse_version("").is_err());
        assert!(matches!(
            Gem.parse_version("ERROR:  While executing gem ... (Gem::Exception)"),
            Err(MpmError::InvalidVersion(_))
        ));
    }
}
