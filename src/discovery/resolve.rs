use std::env;
use std::path::PathBuf;

use tracing::trace;

use crate::discovery::mount::{MountError, MountRegistry, ScopedMount};
use crate::name::ArtifactName;

/// Environment variable holding the default artifact search path.
pub const SEARCH_PATH_ENV: &str = "TESTHOUND_PATH";

/// Ordered list of places compiled suite artifacts may live: plain
/// directory trees or zip archives. The first entry holding an artifact
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Reads the search path from [`SEARCH_PATH_ENV`], split with the
    /// platform path-list separator. `None` when unset or empty.
    pub fn from_env() -> Option<Self> {
        let raw = env::var_os(SEARCH_PATH_ENV)?;
        let entries: Vec<PathBuf> = env::split_paths(&raw).collect();
        if entries.is_empty() {
            return None;
        }
        Some(Self { entries })
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Resolves a logical name to the physical location of its artifact.
    ///
    /// `Ok(None)` means no entry holds it. Mount failures propagate; a
    /// broken archive on the search path is not silently skipped.
    pub fn locate(
        &self,
        name: &ArtifactName,
        registry: &MountRegistry,
    ) -> Result<Option<ArtifactLocation>, MountError> {
        let rel = name.to_relative_path();
        for entry in &self.entries {
            if entry.is_dir() {
                let candidate = entry.join(&rel);
                if candidate.is_file() {
                    trace!(artifact = %name, path = %candidate.display(), "resolved artifact");
                    return Ok(Some(ArtifactLocation::File(candidate)));
                }
            } else if entry.is_file() {
                let scoped = ScopedMount::acquire(registry, entry)?;
                if scoped.mount().has_entry(&rel) {
                    trace!(artifact = %name, archive = %entry.display(), "resolved artifact in archive");
                    return Ok(Some(ArtifactLocation::Entry {
                        archive: entry.clone(),
                        entry: rel,
                    }));
                }
            }
        }
        Ok(None)
    }
}

/// Physical location of a single resolved artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLocation {
    /// Loose file in a directory tree.
    File(PathBuf),
    /// Entry packed inside a zip archive.
    Entry { archive: PathBuf, entry: String },
}

/// Root a discovery walk starts from, derived from a resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLocation {
    Directory(PathBuf),
    Archive { path: PathBuf, prefix: String },
}

impl ArtifactLocation {
    /// Strips the artifact's own relative path off the resolved location,
    /// leaving the root every sibling artifact is addressed under. Pure
    /// string manipulation; no filesystem access.
    pub fn root_for(&self, name: &ArtifactName) -> Option<RootLocation> {
        let rel = name.to_relative_path();
        match self {
            Self::File(path) => {
                let full = path.to_string_lossy().replace('\\', "/");
                let root = full.strip_suffix(&rel)?;
                let root = if root.is_empty() { "." } else { root };
                Some(RootLocation::Directory(PathBuf::from(root)))
            }
            Self::Entry { archive, entry } => {
                let prefix = entry.strip_suffix(&rel)?;
                Some(RootLocation::Archive {
                    path: archive.clone(),
                    prefix: prefix.to_string(),
                })
            }
        }
    }
}
