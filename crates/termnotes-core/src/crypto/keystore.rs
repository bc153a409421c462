//! Persistence for the exported note key.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use zeroize::Zeroizing;

use crate::error::{NotesError, Result};

/// Durable home for the single exported key.
///
/// Implementations must make `store_if_absent` a compare-and-swap on
/// presence: at most one call ever persists a key.
pub trait KeyStore: Send + Sync {
    /// Load the exported key, or `None` if no key has been persisted.
    fn load(&self) -> Result<Option<Zeroizing<String>>>;

    /// Persist `exported` unless a key already exists.
    ///
    /// Returns `true` if this call wrote the key.
    fn store_if_absent(&self, exported: &str) -> Result<bool>;
}

/// Key file on local disk, normally next to the notes database.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    NotesError::Storage(format!(
                        "Failed to create key directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    fn set_file_permissions(&self) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Result<Option<Zeroizing<String>>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(Zeroizing::new(contents))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(NotesError::Storage(format!(
                "Failed to read key file {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    fn store_if_absent(&self, exported: &str) -> Result<bool> {
        self.ensure_parent_dir()?;
        let created = crate::fs::create_exclusive(&self.path, exported.as_bytes()).map_err(|e| {
            NotesError::Storage(format!(
                "Failed to write key file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        if created {
            self.set_file_permissions()?;
        }
        Ok(created)
    }
}

/// Process-local key store for in-memory notebooks and tests.
#[derive(Default)]
pub struct MemoryKeyStore {
    slot: Mutex<Option<Zeroizing<String>>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Zeroizing<String>>>> {
        self.slot
            .lock()
            .map_err(|_| NotesError::Storage("Key slot poisoned".to_string()))
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Result<Option<Zeroizing<String>>> {
        Ok(self.lock_slot()?.clone())
    }

    fn store_if_absent(&self, exported: &str) -> Result<bool> {
        let mut slot = self.lock_slot()?;
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(Zeroizing::new(exported.to_string()));
        Ok(true)
    }
}
