use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::discovery::mount::{ArchiveMount, MountError, MountRegistry, ScopedMount};
use crate::discovery::resolve::{RootLocation, SearchPath};
use crate::name::ArtifactName;

#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("cannot locate root artifact '{name}' on the search path")]
    BootstrapNotFound { name: ArtifactName },

    #[error("resolved location of '{name}' does not end in its own relative path")]
    MalformedLocation { name: ArtifactName },

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("failed to walk artifact tree at '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Enumerates every compiled suite artifact reachable from the root the
/// bootstrap artifact lives under.
///
/// The returned set has no defined order; callers needing determinism
/// sort it themselves. Any mount or traversal failure aborts the whole
/// call: a partial artifact list would let missing tests pass by never
/// running.
pub fn discover(
    bootstrap: &ArtifactName,
    search: &SearchPath,
    registry: &MountRegistry,
) -> Result<HashSet<ArtifactName>, DiscoverError> {
    let location = search
        .locate(bootstrap, registry)?
        .ok_or_else(|| DiscoverError::BootstrapNotFound {
            name: bootstrap.clone(),
        })?;
    let root = location
        .root_for(bootstrap)
        .ok_or_else(|| DiscoverError::MalformedLocation {
            name: bootstrap.clone(),
        })?;

    let names = match root {
        RootLocation::Directory(dir) => walk_directory(&dir)?,
        RootLocation::Archive { path, prefix } => {
            let scoped = ScopedMount::acquire(registry, &path)?;
            // scoped drops at the end of this arm, releasing the mount on
            // success and failure alike if this call owned it
            walk_archive(scoped.mount(), &prefix)?
        }
    };
    debug!(count = names.len(), "discovery finished");
    Ok(names)
}

/// Regular files only; directories and symlinks are never yielded as
/// artifacts.
fn walk_directory(root: &Path) -> Result<HashSet<ArtifactName>, DiscoverError> {
    let mut names = HashSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if let Some(name) = ArtifactName::from_relative_path(rel) {
            names.insert(name);
        }
    }
    Ok(names)
}

fn walk_archive(mount: &ArchiveMount, prefix: &str) -> Result<HashSet<ArtifactName>, MountError> {
    let names = mount
        .entry_names()?
        .iter()
        .filter_map(|entry| entry.strip_prefix(prefix))
        .filter_map(ArtifactName::from_entry)
        .collect();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn name(raw: &str) -> ArtifactName {
        ArtifactName::new(raw)
    }

    #[test]
    fn test_walk_directory_normalizes_names() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("pkg/deep")).unwrap();
        fs::write(root.join("pkg/FooTest.suite"), b"{}").unwrap();
        fs::write(root.join("pkg/deep/BarTest.suite"), b"{}").unwrap();
        fs::write(root.join("pkg/readme.md"), b"skip me").unwrap();

        let names = walk_directory(root).unwrap();

        let expected: HashSet<_> = [name("pkg.FooTest"), name("pkg.deep.BarTest")]
            .into_iter()
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_walk_directory_skips_directories_named_like_artifacts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("pkg/Odd.suite")).unwrap();
        fs::write(root.join("pkg/FooTest.suite"), b"{}").unwrap();

        let names = walk_directory(root).unwrap();

        let expected: HashSet<_> = [name("pkg.FooTest")].into_iter().collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_bootstrap_not_found_is_fatal() {
        let temp = TempDir::new().unwrap();
        let registry = MountRegistry::new();
        let search = SearchPath::new(vec![temp.path().to_path_buf()]);

        let err = discover(&name("boot.Missing"), &search, &registry).unwrap_err();
        assert!(matches!(err, DiscoverError::BootstrapNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "cannot locate root artifact 'boot.Missing' on the search path"
        );
    }
}
