use crate::domain::StorageError;
use crate::ports::outbound::{PreferenceEdit, PreferenceStore, Preferences};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory preference store for unit tests.
///
/// Edits run on a working copy under the write lock and replace the
/// committed map only on success.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    data: RwLock<Preferences>,
    commits: AtomicUsize,
}

impl InMemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing preferences (e.g. legacy data).
    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            data: RwLock::new(prefs),
            commits: AtomicUsize::new(0),
        }
    }

    /// Number of committed edits so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn snapshot(&self) -> Result<Preferences, StorageError> {
        Ok(self.data.read().clone())
    }

    fn edit(&self, edit: &mut PreferenceEdit<'_>) -> Result<bool, StorageError> {
        let mut data = self.data.write();
        let mut working = data.clone();

        if !edit(&mut working)? {
            return Ok(false);
        }

        *data = working;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}
