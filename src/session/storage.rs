//! Key/value backends for the session store

use std::collections::BTreeMap;
use std::sync::Mutex;

#[cfg(feature = "native")]
use std::path::{Path, PathBuf};

#[cfg(feature = "native")]
use super::SessionError;
use super::SessionResult;

/// String key/value storage with local-storage semantics
///
/// Methods take `&self`; backends use interior mutability the same way the
/// browser's `localStorage` does.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> SessionResult<()>;
    fn remove_item(&self, key: &str) -> SessionResult<()>;
}

/// In-process storage, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock leaves the map itself intact
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        self.items().remove(key);
        Ok(())
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        (**self).remove_item(key)
    }
}

/// JSON object file holding the same keys the browser would
///
/// Loaded once on open and rewritten on every change. The file is created
/// lazily, so opening a path that does not exist yet is not an error.
#[cfg(feature = "native")]
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

#[cfg(feature = "native")]
impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| SessionError::Corrupt {
                path: path.clone(),
                error: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened session file {:?} ({} keys)", path, items.len());

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// Default location under the user's data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|p| p.join("rentdesk").join("session.json"))
            .unwrap_or_else(|| PathBuf::from(".rentdesk-session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy, and keep it only once it is on disk
    fn update<F>(&self, change: F) -> SessionResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = items.clone();
        change(&mut next);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> SessionResult<()> {
        if items.is_empty() {
            match std::fs::remove_file(&self.path) {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(items).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        restrict_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(all(feature = "native", unix))]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(all(feature = "native", not(unix)))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(feature = "native")]
impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        self.update(|items| {
            items.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("token"), None);

        storage.set_item("token", "abc").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

        storage.remove_item("token").unwrap();
        storage.remove_item("token").unwrap();
        assert!(storage.is_empty());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("token", "abc").unwrap();
        storage.set_item("isAdmin", "false").unwrap();
        assert!(path.exists());

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("token").as_deref(), Some("abc"));
        assert_eq!(reopened.get_item("isAdmin").as_deref(), Some("false"));

        reopened.remove_item("token").unwrap();
        reopened.remove_item("isAdmin").unwrap();
        assert!(!path.exists());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_failed_write_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileStorage::open(&path).unwrap();

        // The temp file cannot be written over a directory
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(storage.set_item("token", "abc").is_err());
        assert_eq!(storage.get_item("token"), None);
        assert!(!path.exists());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }
}
