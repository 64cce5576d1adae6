//! Time entries, kept newest first.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::LocalZone;
use crate::error::{Result, TimelogError};
use crate::export;
use crate::format::parse_timestamp_input;
use crate::storage::{timestamp, PersistenceGateway, ENTRIES_KEY};

/// Description carried by a quick entry until the user fills it in.
pub const QUICK_ENTRY_DESCRIPTION: &str = "(Click to add description)";

/// Opaque entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A timestamped activity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, fixed at creation
    pub id: EntryId,

    /// When the activity happened
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,

    /// What happened
    pub description: String,

    /// Optional free-form notes; `None` when left blank
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entry {
    /// Whether this entry still carries the quick-entry placeholder.
    pub fn is_quick(&self) -> bool {
        self.description == QUICK_ENTRY_DESCRIPTION
    }
}

/// Fields after validation, ready to store.
struct Fields {
    timestamp: DateTime<Utc>,
    description: String,
    notes: Option<String>,
}

/// Ordered entry collection, newest first.
pub struct EntryStore {
    entries: Vec<Entry>,
    gateway: PersistenceGateway,
    zone: LocalZone,
    persisted: bool,
}

impl EntryStore {
    /// Load the persisted entries. Naive timestamp input is read in `zone`.
    pub fn load(gateway: PersistenceGateway, zone: LocalZone) -> Self {
        let entries = gateway.load_collection(ENTRIES_KEY);
        Self {
            entries,
            gateway,
            zone,
            persisted: true,
        }
    }

    pub fn zone(&self) -> &LocalZone {
        &self.zone
    }

    /// Create an entry and make it the newest.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::Validation` if:
    /// - The timestamp is empty or cannot be parsed
    /// - The description is empty after trimming
    pub fn create(
        &mut self,
        timestamp_input: &str,
        description: &str,
        notes: Option<&str>,
    ) -> Result<Entry> {
        let fields = self.validate(timestamp_input, description, notes)?;
        Ok(self.insert(fields))
    }

    /// Create a placeholder entry awaiting a description.
    ///
    /// The caller is expected to open the returned entry for editing once the
    /// current render pass has finished.
    pub fn create_quick(&mut self, timestamp_input: &str) -> Result<Entry> {
        let timestamp = parse_timestamp_input(timestamp_input, &self.zone)?;
        Ok(self.insert(Fields {
            timestamp,
            description: QUICK_ENTRY_DESCRIPTION.to_string(),
            notes: None,
        }))
    }

    /// Replace the timestamp, description, and notes of an entry in place.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::NotFound` if no entry has `id`, and
    /// `TimelogError::Validation` under the same rules as [`create`](Self::create).
    pub fn update(
        &mut self,
        id: &EntryId,
        timestamp_input: &str,
        description: &str,
        notes: Option<&str>,
    ) -> Result<Entry> {
        let index = self
            .position(id)
            .ok_or_else(|| TimelogError::NotFound(format!("Entry {}", id)))?;
        let fields = self.validate(timestamp_input, description, notes)?;

        let entry = &mut self.entries[index];
        entry.timestamp = fields.timestamp;
        entry.description = fields.description;
        entry.notes = fields.notes;
        let updated = entry.clone();
        self.save();
        Ok(updated)
    }

    /// Remove the entry with `id`. Absent ids are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        let removed = self.entries.len() != before;
        self.save();
        removed
    }

    /// Remove every entry. Confirmation is the caller's job.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.position(id).is_some()
    }

    /// Entries, newest first.
    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the last save reached the backend.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// CSV document of all entries in list order.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::EmptyCollection` when there is nothing to export.
    pub fn export_csv(&self) -> Result<String> {
        export::csv_document(&self.entries, &self.zone)
    }

    fn validate(
        &self,
        timestamp_input: &str,
        description: &str,
        notes: Option<&str>,
    ) -> Result<Fields> {
        let description = description.trim();
        if timestamp_input.trim().is_empty() || description.is_empty() {
            return Err(TimelogError::Validation(
                "Please enter both date/time and description".to_string(),
            ));
        }
        let timestamp = parse_timestamp_input(timestamp_input, &self.zone)?;
        let notes = notes
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Fields {
            timestamp,
            description: description.to_string(),
            notes,
        })
    }

    fn insert(&mut self, fields: Fields) -> Entry {
        let mut id = EntryId::generate();
        while self.contains(&id) {
            id = EntryId::generate();
        }

        let entry = Entry {
            id,
            timestamp: fields.timestamp,
            description: fields.description,
            notes: fields.notes,
        };
        self.entries.insert(0, entry.clone());
        self.save();
        entry
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    fn save(&mut self) {
        self.persisted = self.gateway.save_collection(ENTRIES_KEY, &self.entries);
    }
}
