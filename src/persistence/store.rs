use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{SimError, SimResult};

/// Key used for the whole saved session.
pub const DEFAULT_STORAGE_KEY: &str = "microscope_simulator_progress";

/// Key-value byte storage supplied by the host.
pub trait SessionStore {
    fn get(&self, key: &str) -> SimResult<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, bytes: &[u8]) -> SimResult<()>;
    fn delete(&mut self, key: &str) -> SimResult<()>;
}

/// In-process store used by tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> SimResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> SimResult<()> {
        self.entries.insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> SimResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> SimResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SimError::Store(format!("failed to create store dir {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> SimResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SimError::Store(format!("invalid store key `{key}`")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> SimResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SimError::Store(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> SimResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, bytes)
            .map_err(|e| SimError::Store(format!("failed to write {}: {e}", path.display())))
    }

    fn delete(&mut self, key: &str) -> SimResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SimError::Store(format!(
                "failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}
