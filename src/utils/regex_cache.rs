//! Compiled pattern cache for manager output parsers
//!
//! Manager plugins describe their line grammars as pattern strings; this
//! cache compiles each distinct pattern once per process and hands out
//! cheap clones afterwards.

use crate::error::{MpmError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

static REGEX_CACHE: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Get or compile a regex pattern from the cache
///
/// # Examples
/// ```
/// use mpm::utils::regex_cache::get_cached_regex;
///
/// let regex = get_cached_regex(r"(\S+) \((.+)\)").unwrap();
/// assert!(regex.is_match("rake (0.9.6)"));
/// ```
pub fn get_cached_regex(pattern: &str) -> Result<Regex> {
    if let Ok(cache) = REGEX_CACHE.lock()
        && let Some(regex) = cache.get(pattern)
    {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern)
        .map_err(|e| MpmError::InvalidRegex(format!("{}: {}", pattern, e)))?;

    // Lock poisoning only costs us the cache entry
    if let Ok(mut cache) = REGEX_CACHE.lock() {
        cache.insert(pattern.to_string(), regex.clone());
    }

    Ok(regex)
}

#[cfg(test)]
fn is_cached(pattern: &str) -> bool {
    REGEX_CACHE
        .lock()
        .map(|cache| cache.contains_key(pattern))
        .unwrap_or(false)
}
