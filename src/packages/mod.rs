//! # Package Manager Implementations
//!
//! ## Architecture
//!
//! Each supported tool is a small plugin implementing [`ManagerSpec`]: its
//! CLI name, the arguments of every operation and the grammar of each
//! output line. [`Manager`] wraps a plugin and adds what all plugins share:
//! CLI discovery, process invocation and result caching.
//!
//! - **gem** (`gem.rs`): RubyGems, multi-version `list` rows
//! - **pip** (`pip.rs`): pip, pip2 and pip3, legacy list format, no bulk upgrade
//!
//! ## ManagerRegistry
//!
//! The [`ManagerRegistry`] maps ids to factories so callers can enumerate
//! managers and create fresh instances by id.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mpm::packages::ManagerRegistry;
//! use mpm::process::SystemRunner;
//! use std::sync::Arc;
//!
//! let registry = ManagerRegistry::default();
//! let gem = registry.create("gem", Arc::new(SystemRunner::new()))?;
//! for (id, package) in gem.outdated()? {
//!     println!("{} -> {:?}", id, package.latest_version);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod gem;
pub mod manager;
pub mod pip;
pub mod registry;
pub mod traits;

pub use gem::Gem;
pub use manager::Manager;
pub use pip::{Pip, PipFlavor};
pub use registry::ManagerRegistry;
pub use traits::ManagerSpec;
