//! File-per-key backing store.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{StorageBackend, StorageError};

/// Backing store that keeps one file per key inside a data directory.
///
/// The filesystem analog of browser local storage: values are whole
/// documents rewritten on every `set`, so the newest write wins and a
/// half-written older value is never merged with a newer one.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open a backing store rooted at `dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the directory cannot be
    /// created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Unavailable(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    /// The data directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    // Keys are fixed internal names, but sanitize anyway so a key can never
    // name a path outside the data directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("read {key}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)
            .map_err(|e| StorageError::Io(format!("write {key}: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!("remove {key}: {e}"))),
        }
    }
}
