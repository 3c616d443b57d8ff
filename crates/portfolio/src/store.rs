//! The project collection, persisted as one JSON array in one slot.
//!
//! [`ProjectStore`] is the only code that reads or writes the slot. Every
//! mutation is a whole-collection read-modify-write. Writes are best effort:
//! a slot that refuses a write is logged and otherwise ignored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{default_projects, records_from_value, ProjectForm, ProjectRecord};
use crate::storage::SlotStore;

/// Whether an upsert created or merged a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record had the id; a new one was appended.
    Inserted,
    /// An existing record was merged in place.
    Updated,
}

/// What the slot held on the last read.
enum SlotContents {
    Absent,
    Corrupt,
    Records(Vec<ProjectRecord>),
}

/// Summary of the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Slot key the collection lives under.
    pub slot_key: String,
    /// Whether the slot exists at all.
    pub slot_present: bool,
    /// Number of decodable records.
    pub records: usize,
    /// When the slot was last written, if known.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Ordered project collection over a [`SlotStore`].
#[derive(Debug)]
pub struct ProjectStore<S> {
    slots: S,
    key: String,
}

impl<S: SlotStore> ProjectStore<S> {
    /// Create a store over `slots`, keeping the collection under `key`.
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    /// The slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying slot store.
    #[must_use]
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Read the collection in insertion order.
    ///
    /// An absent, unreadable, unparsable or non-array slot reads as empty.
    #[must_use]
    pub fn read_all(&self) -> Vec<ProjectRecord> {
        match self.read_slot() {
            SlotContents::Records(records) => records,
            SlotContents::Absent | SlotContents::Corrupt => Vec::new(),
        }
    }

    /// Read the collection for display.
    ///
    /// Like [`read_all`](Self::read_all), except that a slot which cannot be
    /// read or parsed yields the default projects instead of nothing. The
    /// slot itself is left untouched.
    #[must_use]
    pub fn read_for_display(&self) -> Vec<ProjectRecord> {
        match self.read_slot() {
            SlotContents::Records(records) => records,
            SlotContents::Absent => Vec::new(),
            SlotContents::Corrupt => default_projects(),
        }
    }

    fn read_slot(&self) -> SlotContents {
        let raw = match self.slots.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SlotContents::Absent,
            Err(e) => {
                warn!("Could not read slot {}: {}", self.key, e);
                return SlotContents::Corrupt;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                let records = records_from_value(value);
                debug!("Read {} project(s) from slot {}", records.len(), self.key);
                SlotContents::Records(records)
            }
            Err(e) => {
                warn!("Slot {} holds invalid JSON: {}", self.key, e);
                SlotContents::Corrupt
            }
        }
    }

    /// Overwrite the slot with `records`.
    ///
    /// Failures are logged and swallowed; callers report the intended
    /// mutation regardless.
    pub fn write_all(&self, records: &[ProjectRecord]) {
        let result = serde_json::to_string(records)
            .map_err(Error::from)
            .and_then(|json| self.slots.set(&self.key, &json));

        if let Err(e) = result {
            warn!("Dropped write of {} project(s): {}", records.len(), e);
        }
    }

    /// Seed the default projects if the slot is absent.
    ///
    /// Returns `true` if the slot was absent and a seed write was issued.
    /// A slot that exists but is corrupt is left alone.
    pub fn ensure_seeded(&self) -> bool {
        match self.slots.get(&self.key) {
            Ok(None) => {
                let defaults = default_projects();
                self.write_all(&defaults);
                info!("Seeded slot {} with {} project(s)", self.key, defaults.len());
                true
            }
            Ok(Some(_)) => false,
            Err(e) => {
                warn!("Could not check slot {} for seeding: {}", self.key, e);
                false
            }
        }
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] if the trimmed id is empty and
    /// [`Error::NotFound`] if no record has it.
    pub fn get(&self, id: &str) -> Result<ProjectRecord> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::MissingId { action: "edit" });
        }

        self.read_all()
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Insert a record, or merge the non-empty submitted fields into the
    /// existing record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] if the trimmed id is empty. Nothing is
    /// written in that case.
    pub fn upsert(&self, form: &ProjectForm) -> Result<UpsertOutcome> {
        let id = form.trimmed_id();
        if id.is_empty() {
            return Err(Error::MissingId { action: "save" });
        }

        let mut records = self.read_all();
        let outcome = if let Some(existing) = records.iter_mut().find(|r| r.id == id) {
            form.apply_to(existing);
            UpsertOutcome::Updated
        } else {
            records.push(form.to_record());
            UpsertOutcome::Inserted
        };

        self.write_all(&records);
        info!("Upserted project {} ({:?})", id, outcome);
        Ok(outcome)
    }

    /// Remove the record with `id`. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingId`] if the trimmed id is empty.
    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::MissingId { action: "delete" });
        }

        let mut records = self.read_all();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            debug!("No project {} to delete", id);
            return Ok(false);
        }

        self.write_all(&records);
        info!("Deleted project {}", id);
        Ok(true)
    }

    /// Summarize the collection.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let slot_present = matches!(self.slots.get(&self.key), Ok(Some(_)));
        StoreStats {
            slot_key: self.key.clone(),
            slot_present,
            records: self.read_all().len(),
            last_modified: self.slots.last_modified(&self.key).ok().flatten(),
        }
    }
}
