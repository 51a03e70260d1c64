use crate::domain::StorageError;
use crate::ports::outbound::{PreferenceEdit, PreferenceStore, Preferences};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed preference store.
///
/// Persists the whole preference map as JSON. Every edit runs under an
/// exclusive `fs2` lock on a side-car `.lock` file and re-reads the data
/// file inside the lock, so edits from other processes (the management
/// CLI and a running daemon) never lose each other's updates.
pub struct FilePreferenceStore {
    path: PathBuf,
    lock_path: PathBuf,
    /// Serializes edits from threads of this process.
    local: Mutex<()>,
}

/// Holds an fs2 lock until dropped.
struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl FilePreferenceStore {
    /// Open (or prepare to create) a store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if let Ok(metadata) = std::fs::metadata(&path) {
            info!(
                "[ab-01] Found existing preferences: {} ({} bytes)",
                path.display(),
                metadata.len()
            );
        } else {
            info!("[ab-01] No existing preferences at {}", path.display());
        }

        let lock_path = path.with_extension("lock");
        Ok(Self {
            path,
            lock_path,
            local: Mutex::new(()),
        })
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, exclusive: bool) -> Result<LockGuard, StorageError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| StorageError::LockFailed {
                message: format!("{}: {}", self.lock_path.display(), e),
            })?;

        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|e| StorageError::LockFailed {
            message: e.to_string(),
        })?;

        Ok(LockGuard { file })
    }

    fn load(&self) -> Result<Preferences, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Preferences::new()),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(Preferences::new());
        }

        serde_json::from_str(&text).map_err(|e| StorageError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, prefs: &Preferences) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(prefs).map_err(|e| StorageError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(
            "[ab-01] Saved {} preference keys to {}",
            prefs.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn snapshot(&self) -> Result<Preferences, StorageError> {
        let _guard = self.lock(false)?;
        self.load()
    }

    fn edit(&self, edit: &mut PreferenceEdit<'_>) -> Result<bool, StorageError> {
        let _local = self.local.lock();
        let _guard = self.lock(true)?;

        let mut working = self.load()?;
        if !edit(&mut working)? {
            return Ok(false);
        }

        self.save(&working)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn set_of(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::open(dir.path().join("prefs.json")).unwrap();

        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_edit_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/prefs.json");

        {
            let store = FilePreferenceStore::open(&path).unwrap();
            store
                .edit(&mut |prefs: &mut Preferences| {
                    prefs.put_string_set("senders", set_of(&["15550000000"]));
                    prefs.put_int("storage_version", 1);
                    Ok(true)
                })
                .unwrap();
        }

        let reopened = FilePreferenceStore::open(&path).unwrap();
        let prefs = reopened.snapshot().unwrap();
        assert_eq!(prefs.get_int("storage_version").unwrap(), Some(1));
        assert!(prefs
            .get_string_set("senders")
            .unwrap()
            .unwrap()
            .contains("15550000000"));
    }

    #[test]
    fn test_declined_edit_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::open(&path).unwrap();

        let committed = store.edit(&mut |_prefs: &mut Preferences| Ok(false)).unwrap();

        assert!(!committed);
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FilePreferenceStore::open(&path).unwrap();
        assert!(matches!(store.snapshot(), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_two_handles_do_not_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let a = Arc::new(FilePreferenceStore::open(&path).unwrap());
        let b = Arc::new(FilePreferenceStore::open(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = if i % 2 == 0 { a.clone() } else { b.clone() };
                std::thread::spawn(move || {
                    store
                        .edit(&mut |prefs: &mut Preferences| {
                            let mut set = prefs
                                .get_string_set("senders")?
                                .cloned()
                                .unwrap_or_default();
                            set.insert(format!("1555000000{}", i));
                            prefs.put_string_set("senders", set);
                            Ok(true)
                        })
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let prefs = a.snapshot().unwrap();
        assert_eq!(prefs.get_string_set("senders").unwrap().unwrap().len(), 8);
    }
}
