//! Loose version model for package manager output
//!
//! Package managers report versions in every shape imaginable: `3.0.3`,
//! `1.0.0.0`, `0.9999999`, `2015.09.12`, `1.0.0.rc1`. A [`Version`] keeps
//! the raw token for display and orders on a list of segments:
//! - numeric runs compare as integers (`1.4.1 < 1.17.2`)
//! - alphabetic runs compare case-insensitively
//! - a numeric segment beats an alphabetic one (`1.0 > 1.0rc1`)
//! - missing trailing segments count as `0` (`1.0 == 1.0.0`)

use crate::error::{MpmError, Result};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Digit run without leading zeros; zero is the empty string
    Num(String),
    Text(String),
}

static ZERO: Segment = Segment::Num(String::new());

impl Segment {
    fn cmp_segment(&self, other: &Segment) -> Ordering {
        match (self, other) {
            // No leading zeros: longer means larger, equal length compares digit-wise
            (Segment::Num(a), Segment::Num(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Num(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Num(_)) => Ordering::Less,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    segments: Vec<Segment>,
}

impl Version {
    /// Parse a raw version token.
    ///
    /// Fails when the token carries no digits: `java` or an error banner
    /// is not a version.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let body = raw
            .strip_prefix('v')
            .or_else(|| raw.strip_prefix('V'))
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(raw);

        let segments = split_segments(body);
        if !segments.iter().any(|s| matches!(s, Segment::Num(_))) {
            return Err(MpmError::InvalidVersion(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Parse every candidate and keep the highest one.
    ///
    /// Candidates that fail to parse are ignored; `None` when nothing parses.
    pub fn max_of<'a, I>(candidates: I) -> Option<Version>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter_map(|c| Version::parse(c).ok())
            .max()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn split_segments(body: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut numeric = false;

    for c in body.chars() {
        if c.is_ascii_digit() {
            if !numeric {
                flush(&mut current, numeric, &mut segments);
                numeric = true;
            }
            current.push(c);
        } else if c.is_alphabetic() {
            if numeric {
                flush(&mut current, numeric, &mut segments);
                numeric = false;
            }
            current.push(c);
        } else {
            flush(&mut current, numeric, &mut segments);
        }
    }
    flush(&mut current, numeric, &mut segments);

    segments
}

fn flush(current: &mut String, numeric: bool, segments: &mut Vec<Segment>) {
    if current.is_empty() {
        return;
    }
    let segment = if numeric {
        Segment::Num(current.trim_start_matches('0').to_string())
    } else {
        Segment::Text(current.to_lowercase())
    };
    segments.push(segment);
    current.clear();
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).unwrap_or(&ZERO);
            let b = other.segments.get(i).unwrap_or(&ZERO);
            match a.cmp_segment(b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = MpmError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).expect("valid version")
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(v("1.4.1") < v("1.17.2"));
        assert!(v("1.17.2") < v("2.0.0"));
        assert!(v("2.0.0") > v("1.0.0"));
        assert!(v("0.9.6") < v("4.0.0"));
        assert!(v("0.4.0") < v("0.5.0"));
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("2.0.0.0"), v("2"));
        assert!(v("1.0") < v("1.0.1"));
    }

    #[test]
    fn test_qualifiers_sort_before_release() {
        assert!(v("1.0.0rc1") < v("1.0.0"));
        assert!(v("1.0.0.beta") < v("1.0.0"));
        assert!(v("1.0.0a1") < v("1.0.0b1"));
        assert!(v("1.0.0-rc2") > v("1.0.0-rc1"));
    }

    #[test]
    fn test_leading_v_is_ignored() {
        assert_eq!(v("v1.2.3"), v("1.2.3"));
        assert_eq!(v("v1.2.3").as_str(), "v1.2.3");
    }

    #[test]
    fn test_irregular_tokens() {
        assert!(v("0.9999999") > v("0.13.1"));
        assert!(v("2015.09.12") > v("0.0.1"));
        assert_eq!(v(" 3.0.3 ").to_string(), "3.0.3");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse(" , ").is_err());
        assert!(matches!(
            Version::parse("..."),
            Err(MpmError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_rejects_tokens_without_digits() {
        assert!(matches!(
            Version::parse("java"),
            Err(MpmError::InvalidVersion(_))
        ));
        assert!(Version::parse("pip").is_err());
        assert!(Version::parse("ERROR:  While executing gem ... (Gem::Exception)").is_err());
        assert!(Version::max_of(["java", "1.2"]).is_some_and(|v| v.as_str() == "1.2"));
    }

    #[test]
    fn test_long_numeric_segments_keep_their_order() {
        assert!(v("1.99999999999999999999") > v("1.99999999999999999998"));
        assert!(v("1.100000000000000000000") > v("1.99999999999999999999"));
        assert_eq!(v("1.007"), v("1.7"));
        assert_eq!(v("1.00"), v("1"));
    }

    #[test]
    fn test_max_of_picks_latest_installed() {
        let max = Version::max_of(["1.4.1", "1.1.0"]).expect("max");
        assert_eq!(max.as_str(), "1.4.1");

        let max = Version::max_of(["0.5.4", "0.4.5", "0.2.3"]).expect("max");
        assert_eq!(max.as_str(), "0.5.4");

        assert!(Version::max_of(std::iter::empty::<&str>()).is_none());
    }

    #[test]
    fn test_total_order_is_consistent() {
        let mut versions = vec![v("2.0.0"), v("1.0.0rc1"), v("1.17.2"), v("1.4.1"), v("1.0")];
        versions.sort();
        let sorted: Vec<&str> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(sorted, vec!["1.0.0rc1", "1.0", "1.4.1", "1.17.2", "2.0.0"]);
    }
}
