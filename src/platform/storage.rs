//! Key-value string storage
//!
//! Mirrors the browser's LocalStorage contract: string keys, string values.

use std::collections::HashMap;
use std::fmt;

/// Why a storage call failed
#[derive(Debug)]
pub enum StorageError {
    /// Backend missing or refused access
    Unavailable(String),
    /// Underlying file I/O failed
    Io(std::io::Error),
    /// Stored data could not be decoded
    Corrupt(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::Io(err) => write!(f, "storage I/O error: {err}"),
            Self::Corrupt(err) => write!(f, "stored data is corrupt: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Io(err) => Some(err),
            Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err)
    }
}

/// String key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store, for tests and hosts without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A JSON object on disk, one string value per key
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<std::collections::BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Default::default()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value.to_owned());
        let json = serde_json::to_string_pretty(&entries)?;

        write_replacing(&self.path, &json)
    }
}

/// Write `contents` to a sibling temp file, then rename it over `path`
///
/// The temp file is removed if the rename fails.
#[cfg(not(target_arch = "wasm32"))]
fn write_replacing(path: &std::path::Path, contents: &str) -> Result<(), StorageError> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    if let Err(err) = std::fs::rename(&tmp, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp) {
            log::warn!("Could not remove {}: {}", tmp.display(), cleanup);
        }
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("highScore").unwrap(), None);
        store.set("highScore", "1200").unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("1200"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("nova_shooter_{}_{}.json", name, std::process::id()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let store = FileStore::new(&path);
        assert_eq!(store.get("highScore").unwrap(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_keeps_other_keys() {
        let path = temp_path("keys");
        let _ = std::fs::remove_file(&path);
        let mut store = FileStore::new(&path);
        store.set("highScore", "300").unwrap();
        store.set("volume", "0.5").unwrap();
        store.set("highScore", "900").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("highScore").unwrap().as_deref(), Some("900"));
        assert_eq!(reopened.get("volume").unwrap().as_deref(), Some("0.5"));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("highScore"), Err(StorageError::Corrupt(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_failed_rename_removes_temp_file() {
        // Renaming a file over a non-empty directory fails
        let dir = temp_path("occupied");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("inner")).unwrap();

        let result = write_replacing(&dir, "{}");
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!dir.with_extension("tmp").exists());
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
