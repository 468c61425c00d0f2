//! Manager CLI discovery
//!
//! Lookup runs over the process `PATH` with a few manager-specific install
//! directories prepended (e.g. Homebrew's Ruby `bin`). Those directories
//! often hold shims or symlinks, so a symlinked hit is resolved a second
//! time to its canonical location.

use crate::ui;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliLocator {
    extra_dirs: Vec<PathBuf>,
    env_path: Option<OsString>,
}

impl CliLocator {
    /// Locator over `extra_dirs` followed by the current `PATH`
    pub fn new<I, P>(extra_dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            extra_dirs: extra_dirs.into_iter().map(Into::into).collect(),
            env_path: env::var_os("PATH"),
        }
    }

    /// Replace the inherited `PATH` value
    pub fn with_env_path(mut self, env_path: Option<OsString>) -> Self {
        self.env_path = env_path;
        self
    }

    /// Add directories searched after the manager-specific ones but before `PATH`
    pub fn with_extra_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extra_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// The effective search path, extra directories first
    pub fn search_path(&self) -> Option<OsString> {
        let mut dirs: Vec<PathBuf> = self.extra_dirs.clone();
        if let Some(path) = &self.env_path {
            dirs.extend(env::split_paths(path));
        }
        // Entries containing the separator cannot be joined; drop them
        dirs.retain(|d| env::join_paths([d]).is_ok());
        if dirs.is_empty() {
            return None;
        }
        env::join_paths(dirs).ok()
    }

    /// Fully qualified path of `cli_name`, or `None` when it is not an
    /// executable file anywhere on the search path.
    pub fn locate(&self, cli_name: &str) -> Option<PathBuf> {
        if cli_name.trim().is_empty() {
            return None;
        }

        let search_path = self.search_path()?;
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let found = which::which_in(cli_name, Some(&search_path), &cwd).ok();
        let resolved = found.and_then(|path| resolve_link(&path, &search_path, &cwd));

        match &resolved {
            Some(path) => ui::debug(&format!("{} CLI found at {}", cli_name, path.display())),
            None => ui::debug(&format!("{} CLI not found.", cli_name)),
        }

        resolved
    }
}

/// Second pass: follow a symlinked hit to the real executable
fn resolve_link(path: &Path, search_path: &OsString, cwd: &Path) -> Option<PathBuf> {
    let is_link = path
        .symlink_metadata()
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return Some(path.to_path_buf());
    }

    let target = path.canonicalize().ok()?;
    if !target.is_file() {
        return None;
    }
    which::which_in(&target, Some(search_path), cwd).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\necho 1.0.0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_missing_cli_is_absent() {
        let locator = CliLocator::new(Vec::<PathBuf>::new());
        assert!(locator.locate("mpm-no-such-manager-cli").is_none());
    }

    #[test]
    fn test_empty_name_is_absent() {
        let locator = CliLocator::new(Vec::<PathBuf>::new());
        assert!(locator.locate("").is_none());
    }

    #[test]
    fn test_no_search_path_is_absent() {
        let locator = CliLocator::new(Vec::<PathBuf>::new()).with_env_path(None);
        assert!(locator.search_path().is_none());
        assert!(locator.locate("sh").is_none());
    }

    #[test]
    fn test_extra_dirs_come_first() {
        let locator = CliLocator::new(["/opt/a/bin", "/opt/b/bin"])
            .with_env_path(Some(OsString::from("/usr/bin")));
        let path = locator.search_path().unwrap();
        let dirs: Vec<PathBuf> = env::split_paths(&path).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/opt/a/bin"),
                PathBuf::from("/opt/b/bin"),
                PathBuf::from("/usr/bin")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_finds_executable_in_extra_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let exe = make_executable(tmp.path(), "fakegem");

        let locator = CliLocator::new([tmp.path()]).with_env_path(None);
        assert_eq!(locator.locate("fakegem"), Some(exe));
    }

    #[cfg(unix)]
    #[test]
    fn test_first_match_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let expected = make_executable(first.path(), "fakepip");
        make_executable(second.path(), "fakepip");

        let locator = CliLocator::new([first.path(), second.path()]).with_env_path(None);
        assert_eq!(locator.locate("fakepip"), Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("plainfile"), "data").unwrap();

        let locator = CliLocator::new([tmp.path()]).with_env_path(None);
        assert!(locator.locate("plainfile").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_resolves_to_real_binary() {
        let real_dir = tempfile::tempdir().unwrap();
        let shim_dir = tempfile::tempdir().unwrap();
        let real = make_executable(real_dir.path(), "gem-real");
        std::os::unix::fs::symlink(&real, shim_dir.path().join("gem")).unwrap();

        let locator = CliLocator::new([shim_dir.path()]).with_env_path(None);
        let found = locator.locate("gem").expect("gem shim should resolve");
        assert_eq!(found, real.canonicalize().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_absent() {
        let shim_dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            shim_dir.path().join("missing-target"),
            shim_dir.path().join("gem"),
        )
        .unwrap();

        let locator = CliLocator::new([shim_dir.path()]).with_env_path(None);
        assert!(locator.locate("gem").is_none());
    }
}
