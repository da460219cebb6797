use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{debug, trace};
use zip::ZipArchive;

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("failed to open archive '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("not a readable archive '{path}': {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("cannot open entry '{entry}' in archive '{path}': {message}")]
    Entry {
        path: PathBuf,
        entry: String,
        message: String,
    },

    #[error("failed to read entry '{entry}' from archive '{path}': {source}")]
    Read {
        path: PathBuf,
        entry: String,
        source: std::io::Error,
    },
}

/// An open zip archive serving as a virtual filesystem over packed
/// artifacts.
pub struct ArchiveMount {
    path: PathBuf,
    archive: Mutex<ZipArchive<File>>,
}

impl ArchiveMount {
    pub fn open(path: &Path) -> Result<Self, MountError> {
        let file = File::open(path).map_err(|source| MountError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let archive = ZipArchive::new(file).map_err(|e| MountError::Invalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive: Mutex::new(archive),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every regular-file entry; directory entries are not
    /// artifacts and are dropped here.
    pub fn entry_names(&self) -> Result<Vec<String>, MountError> {
        let mut archive = self.archive.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(|e| MountError::Invalid {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
            if entry.is_dir() {
                continue;
            }
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    pub fn has_entry(&self, entry: &str) -> bool {
        let mut archive = self.archive.lock().unwrap_or_else(PoisonError::into_inner);
        let found = archive.by_name(entry).is_ok();
        found
    }

    pub fn read(&self, entry: &str) -> Result<Vec<u8>, MountError> {
        let mut archive = self.archive.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = archive.by_name(entry).map_err(|e| MountError::Entry {
            path: self.path.clone(),
            entry: entry.to_string(),
            message: e.to_string(),
        })?;
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf).map_err(|source| MountError::Read {
            path: self.path.clone(),
            entry: entry.to_string(),
            source,
        })?;
        Ok(buf)
    }
}

/// Process-wide table of open archive mounts, keyed by archive path.
///
/// The registry is external shared state; discovery only decides per call
/// whether it owns the mount it traverses.
#[derive(Default)]
pub struct MountRegistry {
    mounts: Mutex<HashMap<PathBuf, Arc<ArchiveMount>>>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry shared by the whole process. The CLI entry point uses this
    /// one; tests construct their own.
    pub fn global() -> &'static MountRegistry {
        static GLOBAL: OnceLock<MountRegistry> = OnceLock::new();
        GLOBAL.get_or_init(MountRegistry::new)
    }

    pub fn is_mounted(&self, path: &Path) -> bool {
        let mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        mounts.contains_key(path)
    }

    fn get(&self, path: &Path) -> Option<Arc<ArchiveMount>> {
        let mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        mounts.get(path).cloned()
    }

    fn insert(&self, mount: Arc<ArchiveMount>) {
        let mut mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        mounts.insert(mount.path().to_path_buf(), mount);
    }

    fn remove(&self, path: &Path) {
        let mut mounts = self.mounts.lock().unwrap_or_else(PoisonError::into_inner);
        mounts.remove(path);
    }
}

/// Scoped view over an archive with explicit ownership.
///
/// Borrowed when the registry already held a mount for the archive; owned
/// when this acquisition opened it. Owned mounts are unregistered on drop,
/// so release runs on every exit path of a traversal. Borrowed mounts are
/// left exactly as found.
pub struct ScopedMount<'r> {
    mount: Arc<ArchiveMount>,
    registry: &'r MountRegistry,
    owned: bool,
}

impl<'r> ScopedMount<'r> {
    pub fn acquire(registry: &'r MountRegistry, archive: &Path) -> Result<Self, MountError> {
        if let Some(existing) = registry.get(archive) {
            trace!(archive = %archive.display(), "reusing mounted archive");
            return Ok(Self {
                mount: existing,
                registry,
                owned: false,
            });
        }
        let mount = Arc::new(ArchiveMount::open(archive)?);
        registry.insert(Arc::clone(&mount));
        debug!(archive = %archive.display(), "mounted archive");
        Ok(Self {
            mount,
            registry,
            owned: true,
        })
    }

    pub fn mount(&self) -> &ArchiveMount {
        &self.mount
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }
}

impl Drop for ScopedMount<'_> {
    fn drop(&mut self) {
        if self.owned {
            self.registry.remove(self.mount.path());
            debug!(archive = %self.mount.path().display(), "released archive mount");
        }
    }
}
