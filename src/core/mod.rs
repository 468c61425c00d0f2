pub mod cache;
pub mod types;
pub mod version;

pub use cache::Memo;
pub use types::{ManagerState, Package, PackageMap, Platform};
pub use version::Version;
