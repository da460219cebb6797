pub mod mount;
pub mod resolve;
pub mod walker;

pub use mount::{ArchiveMount, MountError, MountRegistry, ScopedMount};
pub use resolve::{ArtifactLocation, RootLocation, SearchPath, SEARCH_PATH_ENV};
pub use walker::{discover, DiscoverError};
