//! Command audit persisted through a `PreferenceStore`.
//!
//! The store should be a namespace of its own; keys do not collide with
//! the allow-list keys but sharing one file would serialize their writers.

use crate::domain::{
    CommandAudit, RouterError, AUDIT_KEY_BODY, AUDIT_KEY_RESULT, AUDIT_KEY_SENDER,
    AUDIT_KEY_TIMESTAMP,
};
use crate::ports::{CommandAuditor, SystemTimeSource, TimeSource};
use ab_01_trusted_senders::{PreferenceStore, Preferences, StorageError};
use ab_02_command_engine::ExecutionResult;
use std::sync::Arc;
use tracing::debug;

/// Last-command audit.
pub struct CommandAuditStore<S: PreferenceStore> {
    prefs: Arc<S>,
    clock: Arc<dyn TimeSource>,
}

impl<S: PreferenceStore> CommandAuditStore<S> {
    /// Audit store stamped with the system clock.
    pub fn new(prefs: Arc<S>) -> Self {
        Self::with_clock(prefs, Arc::new(SystemTimeSource))
    }

    /// Audit store stamped with `clock`.
    pub fn with_clock(prefs: Arc<S>, clock: Arc<dyn TimeSource>) -> Self {
        Self { prefs, clock }
    }

    /// Overwrite the audit with this command, in one commit.
    pub fn record(
        &self,
        sender: Option<&str>,
        body: &str,
        result: ExecutionResult,
    ) -> Result<CommandAudit, StorageError> {
        let audit = CommandAudit {
            sender: sender.map(str::to_string),
            body: body.to_string(),
            result: result.as_str().to_string(),
            timestamp_ms: self.clock.now_millis(),
        };

        self.prefs.edit(&mut |prefs: &mut Preferences| {
            match &audit.sender {
                Some(sender) => prefs.put_string(AUDIT_KEY_SENDER, sender.as_str()),
                None => {
                    prefs.remove(AUDIT_KEY_SENDER);
                }
            }
            prefs.put_string(AUDIT_KEY_BODY, audit.body.as_str());
            prefs.put_string(AUDIT_KEY_RESULT, audit.result.as_str());
            prefs.put_int(AUDIT_KEY_TIMESTAMP, audit.timestamp_ms);
            Ok(true)
        })?;

        debug!("[ab-03] Audited {} at {}", audit.result, audit.timestamp_ms);
        Ok(audit)
    }

    /// Last sender, if the transport reported one.
    pub fn last_sender(&self) -> Result<Option<String>, StorageError> {
        self.string(AUDIT_KEY_SENDER)
    }

    /// Last body.
    pub fn last_body(&self) -> Result<Option<String>, StorageError> {
        self.string(AUDIT_KEY_BODY)
    }

    /// Last result name.
    pub fn last_result(&self) -> Result<Option<String>, StorageError> {
        self.string(AUDIT_KEY_RESULT)
    }

    /// Last timestamp in Unix millis.
    pub fn last_timestamp(&self) -> Result<Option<i64>, StorageError> {
        self.prefs.snapshot()?.get_int(AUDIT_KEY_TIMESTAMP)
    }

    /// The whole record, `None` before the first command.
    pub fn last(&self) -> Result<Option<CommandAudit>, StorageError> {
        let prefs = self.prefs.snapshot()?;
        let (Some(body), Some(result), Some(timestamp_ms)) = (
            prefs.get_string(AUDIT_KEY_BODY)?,
            prefs.get_string(AUDIT_KEY_RESULT)?,
            prefs.get_int(AUDIT_KEY_TIMESTAMP)?,
        ) else {
            return Ok(None);
        };
        Ok(Some(CommandAudit {
            sender: prefs.get_string(AUDIT_KEY_SENDER)?.map(str::to_string),
            body: body.to_string(),
            result: result.to_string(),
            timestamp_ms,
        }))
    }

    fn string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.prefs.snapshot()?.get_string(key)?.map(str::to_string))
    }
}

impl<S: PreferenceStore> CommandAuditor for CommandAuditStore<S> {
    fn record(
        &self,
        sender: Option<&str>,
        body: &str,
        result: ExecutionResult,
    ) -> Result<CommandAudit, RouterError> {
        Ok(CommandAuditStore::record(self, sender, body, result)?)
    }
}
