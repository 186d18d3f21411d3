//! Flat-file storage backend.
//!
//! The whole namespace lives in one JSON object (`{"cart-guest": "…", …}`).
//! Every call re-reads the file so separate processes sharing it see each
//! other's writes; concurrent writers are not coordinated and the last rename
//! wins.
//!
//! A file that does not parse reads as empty. The next write moves it aside
//! to `<name>.corrupt` and starts a fresh file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::atomic::write_atomic;
use super::{KeyValueStorage, StorageError};

/// Storage persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

/// Parsed file contents.
struct Loaded {
    entries: BTreeMap<String, String>,
    corrupt: bool,
}

impl FileStorage {
    /// Open (lazily) the storage file at `path`.
    ///
    /// The file and its parent directory are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparseable file is moved before it is replaced.
    #[must_use]
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn load(&self) -> Result<Loaded, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Loaded {
                entries: BTreeMap::new(),
                corrupt: false,
            });
        }

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(Loaded {
                entries,
                corrupt: false,
            }),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is corrupt, treating as empty"
                );
                Ok(Loaded {
                    entries: BTreeMap::new(),
                    corrupt: true,
                })
            }
        }
    }

    fn modify(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let Loaded {
            mut entries,
            corrupt,
        } = self.load()?;

        if corrupt {
            let backup = self.corrupt_path();
            fs::rename(&self.path, &backup)?;
            warn!(backup = %backup.display(), "moved corrupt storage file aside");
        }

        apply(&mut entries);
        let json = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.entries.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("local-storage.json"));
        assert_eq!(storage.get("cart-guest").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local-storage.json");

        let storage = FileStorage::new(&path);
        storage.set("cart-a@x.com", r#"{"state":{"cart":[]}}"#).unwrap();
        storage.set("cart-guest", "{}").unwrap();
        storage.remove("cart-guest").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("cart-a@x.com").unwrap().as_deref(),
            Some(r#"{"state":{"cart":[]}}"#)
        );
        assert_eq!(reopened.get("cart-guest").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");
        fs::write(&path, "{ truncated").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("x").unwrap(), None);

        storage.set("x", "y").unwrap();
        assert_eq!(storage.get("x").unwrap().as_deref(), Some("y"));
        assert_eq!(
            fs::read_to_string(storage.corrupt_path()).unwrap(),
            "{ truncated"
        );

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("x").unwrap().as_deref(), Some("y"));
    }

    #[test]
    fn test_remove_on_corrupt_file_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");
        fs::write(&path, "[1, 2]").unwrap();

        let storage = FileStorage::new(&path);
        storage.remove("auth-session").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    }
}
