use std::fmt;
use std::path::Path;

/// File suffix the build step gives every compiled suite artifact.
pub const ARTIFACT_SUFFIX: &str = ".suite";

/// Fully-qualified logical name of a compiled suite artifact.
///
/// Names are dot-separated (`pkg.deep.FooTest`) and bijective with the
/// artifact's relative path under its root: strip the suffix, swap the
/// path separator for a dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts a root-relative path into a logical name.
    ///
    /// Returns `None` for paths that are not UTF-8 or do not carry the
    /// artifact suffix.
    pub fn from_relative_path(rel: &Path) -> Option<Self> {
        let rel = rel.to_str()?;
        Self::from_entry(&rel.replace('\\', "/"))
    }

    /// Converts an archive entry path (always `/`-separated) into a
    /// logical name.
    pub fn from_entry(entry: &str) -> Option<Self> {
        let stem = entry.strip_suffix(ARTIFACT_SUFFIX)?;
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.replace('/', ".")))
    }

    /// Root-relative path of the artifact this name identifies,
    /// `/`-separated. Inverse of [`from_entry`](Self::from_entry).
    pub fn to_relative_path(&self) -> String {
        format!("{}{}", self.0.replace('.', "/"), ARTIFACT_SUFFIX)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
