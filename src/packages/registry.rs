//! # Manager Registry
//!
//! Maps manager ids to factories producing [`Manager`] instances, so the
//! orchestrator can enumerate what exists and keep only what makes sense
//! on the host platform.
//!
//! ## Adding a New Manager
//!
//! 1. Create `src/packages/<manager>.rs` with a type implementing `ManagerSpec`
//! 2. Register it in `ManagerRegistry::register_defaults()`

use crate::core::Platform;
use crate::error::{MpmError, Result};
use crate::packages::gem::Gem;
use crate::packages::manager::Manager;
use crate::packages::pip::{Pip, PipFlavor};
use crate::packages::traits::ManagerSpec;
use crate::process::CommandRunner;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds the `ManagerSpec` behind a manager id
pub type SpecFactory = Box<dyn Fn() -> Box<dyn ManagerSpec> + Send + Sync>;

pub struct ManagerRegistry {
    factories: BTreeMap<String, SpecFactory>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn() -> Box<dyn ManagerSpec> + Send + Sync + 'static,
    {
        self.factories.insert(id.to_string(), Box::new(factory));
    }

    pub fn register_defaults(&mut self) {
        self.register("gem", || Box::new(Gem));
        self.register("pip", || Box::new(Pip::new(PipFlavor::Default)));
        self.register("pip2", || Box::new(Pip::new(PipFlavor::Python2)));
        self.register("pip3", || Box::new(Pip::new(PipFlavor::Python3)));
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn has(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Fresh manager instance for `id`
    pub fn create(&self, id: &str, runner: Arc<dyn CommandRunner>) -> Result<Manager> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| MpmError::UnknownManager(id.to_string()))?;
        Ok(Manager::from_boxed(factory(), runner))
    }

    /// One fresh instance per registered manager supporting `platform`
    pub fn for_platform(&self, platform: Platform, runner: Arc<dyn CommandRunner>) -> Vec<Manager> {
        self.factories
            .values()
            .map(|factory| factory())
            .filter(|spec| spec.platforms().contains(&platform))
            .map(|spec| Manager::from_boxed(spec, runner.clone()))
            .collect()
    }

    /// Instances for the requested ids, or every registered one when empty.
    ///
    /// Managers not supporting `platform` are left out; unknown ids are errors.
    pub fn select(
        &self,
        ids: &[String],
        platform: Option<Platform>,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Vec<Manager>> {
        let ids: Vec<String> = if ids.is_empty() {
            self.factories.keys().cloned().collect()
        } else {
            ids.to_vec()
        };

        let mut managers = Vec::with_capacity(ids.len());
        for id in &ids {
            let manager = self.create(id, runner.clone())?;
            if platform.is_none_or(|p| manager.supports_platform(p)) {
                managers.push(manager);
            }
        }
        Ok(managers)
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }
}
