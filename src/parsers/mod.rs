//! Output Parser Protocol
//!
//! Manager CLIs print loosely structured text: banners, section headers and
//! blank lines interleaved with one data row per package. Plugins describe a
//! data row with a [`LinePattern`] and turn its captures into a [`Package`];
//! [`parse_lines`] drives that over the whole output. Lines that do not match
//! are dropped silently, and no line depends on any other.

use crate::core::{Package, PackageMap};
use crate::error::Result;
use crate::utils::regex_cache;
use regex::Captures;

/// Literal marker gem puts in front of bundled ("default") versions
const DEFAULT_MARKER: &str = "default:";

/// Regex matching one data row of a manager's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePattern(&'static str);

impl LinePattern {
    pub const fn new(pattern: &'static str) -> Self {
        Self(pattern)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Captures for `line`, `None` when the line is not a data row
    pub fn captures<'l>(&self, line: &'l str) -> Result<Option<Captures<'l>>> {
        let regex = regex_cache::get_cached_regex(self.0)?;
        Ok(regex.captures(line))
    }
}

/// Run `parse_line` over every line of `output`, keyed by package id.
///
/// A later row with the same id replaces the earlier one.
pub fn parse_lines<F>(output: &str, mut parse_line: F) -> Result<PackageMap>
where
    F: FnMut(&str) -> Result<Option<Package>>,
{
    let mut packages = PackageMap::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(package) = parse_line(line)? {
            packages.insert(package.id.clone(), package);
        }
    }

    Ok(packages)
}

/// Text of capture group `index`, empty when the group did not participate
pub fn group<'l>(caps: &Captures<'l>, index: usize) -> &'l str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

/// Split a parenthesised version list into its version tokens.
///
/// `"1.4.1, default: 1.1.0"` yields `["1.4.1", "1.1.0"]`. Annotations such as
/// the `default:` marker or a platform suffix (`x86_64-linux`) are dropped:
/// only tokens starting with a digit are kept.
pub fn version_tokens(raw: &str) -> Vec<&str> {
    raw.split([',', ' ', '\t'])
        .map(|token| token.trim())
        .map(|token| token.strip_prefix(DEFAULT_MARKER).unwrap_or(token))
        .filter(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .collect()
}

/// Split `"2.4.0, /home/kev/venvs/mpm"` into the version and the
/// non-standard install location, if any.
pub fn split_location(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(',') {
        Some((version, location)) => {
            let location = location.trim();
            (
                version.trim(),
                (!location.is_empty()).then_some(location),
            )
        }
        None => (raw.trim(), None),
    }
}

/// Display name carrying the install location as a parenthetical
pub fn annotate_name(id: &str, location: Option<&str>) -> String {
    match location {
        Some(location) => format!("{} ({})", id, location),
        None => id.to_string(),
    }
}

/// Whether a search hit is the exact package the user asked for
pub fn exact_match(query: &str, package_id: &str) -> bool {
    normalize_id(query) == normalize_id(package_id)
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}
