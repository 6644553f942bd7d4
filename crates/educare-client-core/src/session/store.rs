use anyhow::Context as _;
use educare_shared::{
    const_config::session::{legacy::LEGACY_KEYS, SESSION_KEY},
    log_err_as_error, log_err_as_warn,
};
use std::iter;
use tracing::warn;

use super::{
    legacy,
    record::{SessionRecord, SessionRecordError},
};
use crate::storage::KeyValueStore;

/// Reads and writes the session record. Fails closed: anything that cannot be
/// read back as a complete record is wiped and treated as logged out.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces any existing record. Older layouts are dropped afterwards so
    /// they can never shadow the new record.
    #[tracing::instrument(skip_all, fields(role = ?record.role()))]
    pub fn write(&self, record: &SessionRecord) -> anyhow::Result<()> {
        let value = serde_json::to_string(record).context("failed to serialize session record")?;
        self.storage
            .set_item(SESSION_KEY, &value)
            .context("failed to persist session record")?;
        // The write just succeeded, removals on the same storage should too
        for key in LEGACY_KEYS {
            log_err_as_error!(self.storage.remove_item(key));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn read(&self) -> Option<SessionRecord> {
        match self.try_read() {
            Ok(record) => record,
            Err(err) => {
                warn!(?err, "discarding unusable session record");
                self.clear();
                None
            }
        }
    }

    /// Removes the record in every layout it was ever written in
    #[tracing::instrument(skip(self))]
    pub fn clear(&self) {
        for key in iter::once(SESSION_KEY).chain(LEGACY_KEYS) {
            log_err_as_warn!(self.storage.remove_item(key));
        }
    }

    fn try_read(&self) -> Result<Option<SessionRecord>, SessionRecordError> {
        let raw = self
            .storage
            .get_item(SESSION_KEY)
            .map_err(SessionRecordError::Unreadable)?;
        let Some(raw) = raw else {
            return legacy::read_legacy(&self.storage);
        };
        let record: SessionRecord = serde_json::from_str(&raw)?;
        record.checked().map(Some)
    }
}
