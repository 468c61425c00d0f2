//! Command handlers behind the `mpm` binary
//!
//! Every handler fans out over the selected managers. A manager whose CLI
//! is missing, or which cannot do the requested operation, is reported and
//! skipped; only genuine failures make the command fail.

pub mod cleanup;
pub mod list;
pub mod managers;
pub mod search;
pub mod upgrade;

use crate::config::Settings;
use crate::core::Platform;
use crate::error::{MpmError, Result};
use crate::packages::{Manager, ManagerRegistry};
use crate::process::{CommandRunner, SystemRunner};
use crate::ui as output;
use rayon::prelude::*;
use std::sync::Arc;

/// Managers selected for this invocation, plus output mode
pub struct Context {
    pub managers: Vec<Manager>,
    pub json: bool,
}

impl Context {
    /// `ids` from the command line win over the `managers` setting
    pub fn new(settings: &Settings, ids: &[String], json: bool) -> Result<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(match settings.timeout {
            Some(timeout) => SystemRunner::with_timeout(timeout),
            None => SystemRunner::new(),
        });
        let ids = if ids.is_empty() { settings.managers.as_slice() } else { ids };

        let managers = ManagerRegistry::default()
            .select(ids, Platform::current(), runner)?
            .into_iter()
            .map(|manager| manager.with_extra_search_dirs(&settings.search_paths))
            .collect();

        Ok(Self::with_managers(managers, json))
    }

    pub fn with_managers(managers: Vec<Manager>, json: bool) -> Self {
        Self { managers, json }
    }
}

/// Run `op` on every manager in parallel, keeping manager order
pub(crate) fn fan_out<'m, T, F>(managers: &'m [Manager], op: F) -> Vec<(&'m Manager, Result<T>)>
where
    T: Send,
    F: Fn(&'m Manager) -> Result<T> + Sync,
{
    managers.par_iter().map(|manager| (manager, op(manager))).collect()
}

/// Per-manager outcomes once skips and failures have been reported
pub(crate) struct Settled<'m, T> {
    pub done: Vec<(&'m Manager, T)>,
    failures: usize,
}

impl<T> Settled<'_, T> {
    /// Error out if any manager genuinely failed
    pub fn finish(self) -> Result<()> {
        if self.failures > 0 {
            return Err(MpmError::Other(format!("{} manager(s) failed", self.failures)));
        }
        Ok(())
    }
}

pub(crate) fn settle<'m, T>(results: Vec<(&'m Manager, Result<T>)>) -> Settled<'m, T> {
    let mut done = Vec::with_capacity(results.len());
    let mut failures = 0;

    for (manager, result) in results {
        match result {
            Ok(value) => done.push((manager, value)),
            Err(MpmError::ManagerUnavailable { .. }) => {
                output::warning(&format!("Skipping {}: CLI not found", manager.name()));
            }
            Err(e @ MpmError::Unsupported { .. }) => {
                output::warning(&format!("{} (not supported)", e));
            }
            Err(e) => {
                output::error(&format!("{}: {}", manager.name(), e));
                failures += 1;
            }
        }
    }

    Settled { done, failures }
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
