//! # Outbound Ports (Driven Ports)
//!
//! Persistence required by the Trusted Senders service.
//!
//! Production: `FilePreferenceStore`
//! Testing: `InMemoryPreferenceStore`

use crate::domain::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single typed preference value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceValue {
    /// Plain string.
    String(String),
    /// Set of strings.
    StringSet(BTreeSet<String>),
    /// Integer (schema versions, timestamps).
    Int(i64),
}

impl PreferenceValue {
    /// Kind label used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::StringSet(_) => "string_set",
            Self::Int(_) => "int",
        }
    }
}

/// String-keyed preference map.
///
/// Adapters hand out snapshots of this type and apply edits to it as a
/// whole, so a multi-key change is committed or discarded together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    entries: BTreeMap<String, PreferenceValue>,
}

impl Preferences {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a string value.
    pub fn get_string(&self, key: &str) -> Result<Option<&str>, StorageError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(PreferenceValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(key, "string", other)),
        }
    }

    /// Get a string-set value.
    pub fn get_string_set(&self, key: &str) -> Result<Option<&BTreeSet<String>>, StorageError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(PreferenceValue::StringSet(set)) => Ok(Some(set)),
            Some(other) => Err(mismatch(key, "string_set", other)),
        }
    }

    /// Get an integer value.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(PreferenceValue::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(mismatch(key, "int", other)),
        }
    }

    /// Put a string value.
    pub fn put_string(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .insert(key.to_string(), PreferenceValue::String(value.into()));
    }

    /// Put a string-set value.
    pub fn put_string_set(&mut self, key: &str, value: BTreeSet<String>) {
        self.entries
            .insert(key.to_string(), PreferenceValue::StringSet(value));
    }

    /// Put an integer value.
    pub fn put_int(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), PreferenceValue::Int(value));
    }

    /// Remove a key, returning the previous value.
    pub fn remove(&mut self, key: &str) -> Option<PreferenceValue> {
        self.entries.remove(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn mismatch(key: &str, expected: &'static str, found: &PreferenceValue) -> StorageError {
    StorageError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Edit callback: mutate the working copy, return `Ok(true)` to commit.
pub type PreferenceEdit<'a> = dyn FnMut(&mut Preferences) -> Result<bool, StorageError> + 'a;

/// Abstract interface for durable preference storage.
pub trait PreferenceStore: Send + Sync {
    /// Read a consistent copy of all preferences.
    fn snapshot(&self) -> Result<Preferences, StorageError>;

    /// Run a read-modify-write against the stored preferences.
    ///
    /// ## Atomicity Guarantee
    ///
    /// The callback sees the latest committed state and no other edit can
    /// interleave with it. If it returns `Ok(true)` the whole working copy
    /// is committed; `Ok(false)` or `Err` leaves storage untouched.
    /// Returns whether a commit happened.
    fn edit(&self, edit: &mut PreferenceEdit<'_>) -> Result<bool, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_roundtrip_in_map() {
        let mut prefs = Preferences::new();
        prefs.put_string("name", "androbot");
        prefs.put_int("version", 1);
        prefs.put_string_set("set", ["a".to_string()].into_iter().collect());

        assert_eq!(prefs.get_string("name").unwrap(), Some("androbot"));
        assert_eq!(prefs.get_int("version").unwrap(), Some(1));
        assert_eq!(prefs.get_string_set("set").unwrap().map(|s| s.len()), Some(1));
        assert_eq!(prefs.len(), 3);
    }

    #[test]
    fn test_missing_key_is_none() {
        let prefs = Preferences::new();
        assert_eq!(prefs.get_int("absent").unwrap(), None);
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_type_mismatch() {
        let mut prefs = Preferences::new();
        prefs.put_int("senders", 3);

        let result = prefs.get_string_set("senders");
        assert!(matches!(
            result,
            Err(StorageError::TypeMismatch { expected: "string_set", found: "int", .. })
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let mut prefs = Preferences::new();
        prefs.put_int("storage_version", 1);

        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"entries":{"storage_version":{"int":1}}}"#);
    }
}
