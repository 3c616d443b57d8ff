//! In-process slot store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

use super::SlotStore;

/// Slot store kept in a process-local map.
///
/// A read-only instance rejects every write, which is how a browser behaves
/// when storage is disabled or the quota is exhausted.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    read_only: bool,
}

impl MemorySlots {
    /// Create an empty, writable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Create a store with one slot pre-populated.
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let slots = Self::default();
        if let Ok(mut map) = slots.slots.lock() {
            map.insert(key.to_string(), (value.to_string(), Utc::now()));
        }
        slots
    }

    /// Turn a populated store read-only.
    #[must_use]
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    fn map(&self) -> Result<MutexGuard<'_, HashMap<String, (String, DateTime<Utc>)>>> {
        self.slots
            .lock()
            .map_err(|_| Error::internal("memory slot map poisoned"))
    }
}

impl SlotStore for MemorySlots {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map()?.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::slot_write(key, "storage is read-only"));
        }
        self.map()?
            .insert(key.to_string(), (value.to_string(), Utc::now()));
        Ok(())
    }

    fn last_modified(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.map()?.get(key).map(|(_, at)| *at))
    }
}
