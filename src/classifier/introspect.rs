use std::fs;

use tracing::trace;

use crate::discovery::mount::{MountError, MountRegistry, ScopedMount};
use crate::discovery::resolve::{ArtifactLocation, SearchPath};
use crate::name::ArtifactName;

use super::meta::SuiteMeta;

/// Capability to load an artifact's structural metadata without running
/// any of its code.
pub trait Introspect {
    fn introspect(&self, name: &ArtifactName) -> Result<SuiteMeta, IntrospectError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IntrospectError {
    #[error("artifact '{name}' not found on the search path")]
    NotFound { name: ArtifactName },

    #[error("failed to read artifact '{name}': {source}")]
    Read {
        name: ArtifactName,
        source: std::io::Error,
    },

    #[error("malformed metadata in artifact '{name}': {message}")]
    Malformed { name: ArtifactName, message: String },

    #[error(transparent)]
    Mount(#[from] MountError),
}

/// Introspector that resolves artifacts through the same search path and
/// mount machinery discovery uses.
pub struct PathIntrospector<'a> {
    search: &'a SearchPath,
    registry: &'a MountRegistry,
}

impl<'a> PathIntrospector<'a> {
    pub fn new(search: &'a SearchPath, registry: &'a MountRegistry) -> Self {
        Self { search, registry }
    }
}

impl Introspect for PathIntrospector<'_> {
    fn introspect(&self, name: &ArtifactName) -> Result<SuiteMeta, IntrospectError> {
        let location = self
            .search
            .locate(name, self.registry)?
            .ok_or_else(|| IntrospectError::NotFound { name: name.clone() })?;

        let bytes = match location {
            ArtifactLocation::File(path) => {
                fs::read(&path).map_err(|source| IntrospectError::Read {
                    name: name.clone(),
                    source,
                })?
            }
            ArtifactLocation::Entry { archive, entry } => {
                let scoped = ScopedMount::acquire(self.registry, &archive)?;
                scoped.mount().read(&entry)?
            }
        };
        trace!(artifact = %name, bytes = bytes.len(), "loaded artifact metadata");

        serde_json::from_slice(&bytes).map_err(|e| IntrospectError::Malformed {
            name: name.clone(),
            message: e.to_string(),
        })
    }
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
    fn test_introspect_loose_artifact() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(
            root.join("pkg/FooTest.suite"),
            br#"{"constructors": [{"params": []}]}"#,
        )
        .unwrap();

        let registry = MountRegistry::new();
        let search = SearchPath::new(vec![root.to_path_buf()]);
        let introspector = PathIntrospector::new(&search, &registry);

        let meta = introspector.introspect(&name("pkg.FooTest")).unwrap();
        assert!(meta.has_no_arg_constructor());
    }

    #[test]
    fn test_introspect_missing_artifact() {
        let temp = TempDir::new().unwrap();
        let registry = MountRegistry::new();
        let search = SearchPath::new(vec![temp.path().to_path_buf()]);
        let introspector = PathIntrospector::new(&search, &registry);

        let err = introspector.introspect(&name("pkg.Missing")).unwrap_err();
        assert!(matches!(err, IntrospectError::NotFound { .. }));
    }

    #[test]
    fn test_introspect_malformed_metadata() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("Broken.suite"), b"\x00\x01 not json").unwrap();

        let registry = MountRegistry::new();
        let search = SearchPath::new(vec![root.to_path_buf()]);
        let introspector = PathIntrospector::new(&search, &registry);

        let err = introspector.introspect(&name("Broken")).unwrap_err();
        assert!(matches!(err, IntrospectError::Malformed { .. }));
        assert!(err.to_string().contains("Broken"));
    }
}
