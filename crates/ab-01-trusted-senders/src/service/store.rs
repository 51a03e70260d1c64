//! Trusted Sender Store
//!
//! Persistent set of normalized sender numbers.
//!
//! ## Storage layout
//!
//! | Key | Kind | Meaning |
//! |-----|------|---------|
//! | `senders` | string set | Normalized numbers |
//! | `storage_version` | int | Schema version, absent means 0 |

use crate::domain::{normalize, NormalizedNumber, StorageError, TrustError};
use crate::ports::outbound::{PreferenceStore, Preferences};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Preference key holding the sender set.
pub const KEY_SENDERS: &str = "senders";

/// Preference key holding the schema version.
pub const KEY_STORAGE_VERSION: &str = "storage_version";

/// Schema version written by this build.
///
/// Version 1: entries are stored in canonical `normalize` form.
pub const CURRENT_STORAGE_VERSION: i64 = 1;

/// Result of a migration check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Stored version is current (or newer); nothing written.
    UpToDate {
        /// Version found in storage
        version: i64,
    },
    /// Entries re-normalized and version stamped.
    Migrated {
        /// Version found in storage
        from: i64,
        /// Entry count before migration
        entries_before: usize,
        /// Entry count after normalization and deduplication
        entries_after: usize,
    },
}

/// Persistent allow-list of normalized sender numbers.
pub struct TrustedSenderStore<S: PreferenceStore> {
    prefs: Arc<S>,
}

impl<S: PreferenceStore> TrustedSenderStore<S> {
    /// Open the store, running the one-time migration before any read or
    /// write is served.
    pub fn open(prefs: Arc<S>) -> Result<Self, TrustError> {
        let store = Self { prefs };
        store.migrate_if_needed()?;
        Ok(store)
    }

    /// All trusted numbers: normalized on read, blanks dropped, deduplicated,
    /// sorted. Never writes.
    pub fn get_all(&self) -> Result<Vec<NormalizedNumber>, TrustError> {
        let prefs = self.prefs.snapshot()?;
        let canonical = canonical_set(&prefs)?;
        Ok(canonical.into_iter().collect())
    }

    /// Add a sender. Returns `true` only if the normalized number was not
    /// yet present; storage is written only in that case.
    pub fn add(&self, raw: &str) -> Result<bool, TrustError> {
        let normalized = normalize(raw);
        if normalized.is_blank() {
            debug!("[ab-01] Rejecting blank sender on add: {:?}", raw);
            return Ok(false);
        }

        let added = self.prefs.edit(&mut |prefs: &mut Preferences| {
            let mut current = prefs.get_string_set(KEY_SENDERS)?.cloned().unwrap_or_default();
            if !current.insert(normalized.as_str().to_string()) {
                return Ok(false);
            }
            prefs.put_string_set(KEY_SENDERS, current);
            Ok(true)
        })?;

        info!("[ab-01] Add trusted sender {} (added={})", normalized, added);
        Ok(added)
    }

    /// Remove a sender. Returns `true` only if something was removed;
    /// storage is written only in that case.
    pub fn remove(&self, raw: &str) -> Result<bool, TrustError> {
        let normalized = normalize(raw);
        if normalized.is_blank() {
            debug!("[ab-01] Rejecting blank sender on remove: {:?}", raw);
            return Ok(false);
        }

        let removed = self.prefs.edit(&mut |prefs: &mut Preferences| {
            let mut current = prefs.get_string_set(KEY_SENDERS)?.cloned().unwrap_or_default();
            if !current.remove(normalized.as_str()) {
                return Ok(false);
            }
            prefs.put_string_set(KEY_SENDERS, current);
            Ok(true)
        })?;

        info!("[ab-01] Remove trusted sender {} (removed={})", normalized, removed);
        Ok(removed)
    }

    /// Schema version currently in storage (0 if never stamped).
    pub fn storage_version(&self) -> Result<i64, TrustError> {
        Ok(self.prefs.snapshot()?.get_int(KEY_STORAGE_VERSION)?.unwrap_or(0))
    }

    /// Bring stored entries up to the current schema.
    ///
    /// Re-normalizes and deduplicates in place and stamps the version in the
    /// same commit. Data is canonicalized, never reset. A second call is a
    /// no-op because the version guard short-circuits.
    pub fn migrate_if_needed(&self) -> Result<MigrationOutcome, TrustError> {
        let mut outcome = MigrationOutcome::UpToDate {
            version: CURRENT_STORAGE_VERSION,
        };
        let mut invalid = None;

        self.prefs.edit(&mut |prefs: &mut Preferences| {
            let stored = prefs.get_int(KEY_STORAGE_VERSION)?.unwrap_or(0);
            if stored < 0 {
                invalid = Some(stored);
                return Ok(false);
            }
            if stored >= CURRENT_STORAGE_VERSION {
                outcome = MigrationOutcome::UpToDate { version: stored };
                return Ok(false);
            }

            let entries_before = prefs.get_string_set(KEY_SENDERS)?.map_or(0, |s| s.len());
            let migrated: BTreeSet<String> = canonical_set(prefs)?
                .into_iter()
                .map(NormalizedNumber::into_inner)
                .collect();
            let entries_after = migrated.len();

            prefs.put_string_set(KEY_SENDERS, migrated);
            prefs.put_int(KEY_STORAGE_VERSION, CURRENT_STORAGE_VERSION);

            outcome = MigrationOutcome::Migrated {
                from: stored,
                entries_before,
                entries_after,
            };
            Ok(true)
        })?;

        if let Some(version) = invalid {
            warn!("[ab-01] Refusing to migrate from invalid storage version {}", version);
            return Err(TrustError::InvalidVersion(version));
        }

        match &outcome {
            MigrationOutcome::UpToDate { version } if *version > CURRENT_STORAGE_VERSION => {
                warn!(
                    "[ab-01] Storage version {} is newer than supported {}",
                    version, CURRENT_STORAGE_VERSION
                );
            }
            MigrationOutcome::UpToDate { version } => {
                debug!("[ab-01] Storage version {} is current", version);
            }
            MigrationOutcome::Migrated {
                from,
                entries_before,
                entries_after,
            } => {
                info!(
                    "[ab-01] Migrated trusted senders v{} -> v{} ({} -> {} entries)",
                    from, CURRENT_STORAGE_VERSION, entries_before, entries_after
                );
            }
        }

        Ok(outcome)
    }
}

/// Canonical view of the stored set: normalized, non-blank, ordered.
fn canonical_set(prefs: &Preferences) -> Result<BTreeSet<NormalizedNumber>, StorageError> {
    let stored = prefs.get_string_set(KEY_SENDERS)?;
    Ok(stored
        .into_iter()
        .flatten()
        .map(|entry| normalize(entry))
        .filter(|n| !n.is_blank())
        .collect())
}
