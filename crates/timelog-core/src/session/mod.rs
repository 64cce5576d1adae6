//! Session controller: one running session of the time log.
//!
//! Owns both stores, the injected clock, the display mode, and the edit
//! state machine. At most one entry is edited at a time; beginning a new
//! edit discards the previous unsaved one.
//!
//! Quick capture schedules an "open for edit" follow-up instead of
//! transitioning immediately. The host runs follow-ups with
//! [`SessionController::run_follow_ups`] (or [`SessionController::tick`])
//! once the current render pass has completed.

mod intent;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::clock::{Clock, LocalZone};
use crate::entries::{Entry, EntryId, EntryStore};
use crate::error::{Result, TimelogError};
use crate::export::CsvExport;
use crate::format::{format_timestamp, timestamp_input, TimezoneMode};
use crate::storage::timestamp::canonical;
use crate::storage::PersistenceGateway;
use crate::templates::{Template, TemplateId, TemplateStore};

pub use intent::{
    user_message, FormField, FormInput, Intent, Notice, NoticeKind, UiPort, View,
};

/// Edit state of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EntryId),
}

/// Field values to present when an entry is opened for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub entry_id: EntryId,
    /// Local wall-clock `YYYY-MM-DDTHH:MM:SS`
    pub timestamp: String,
    /// Empty when the entry still carries the quick-entry placeholder
    pub description: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FollowUp {
    OpenForEdit(EntryId),
}

pub struct SessionController {
    entries: EntryStore,
    templates: TemplateStore,
    clock: Box<dyn Clock>,
    mode: TimezoneMode,
    state: EditState,
    follow_ups: VecDeque<FollowUp>,
}

impl SessionController {
    /// Load both collections through `gateway` and start idle.
    pub fn load(gateway: PersistenceGateway, zone: LocalZone, clock: Box<dyn Clock>) -> Self {
        let entries = EntryStore::load(gateway.clone(), zone);
        let templates = TemplateStore::load(gateway);
        info!(
            entries = entries.len(),
            templates = templates.len(),
            zone = %zone,
            "Session loaded"
        );
        Self {
            entries,
            templates,
            clock,
            mode: TimezoneMode::default(),
            state: EditState::Idle,
            follow_ups: VecDeque::new(),
        }
    }

    pub fn with_mode(mut self, mode: TimezoneMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&EntryId> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing(id) => Some(id),
        }
    }

    pub fn mode(&self) -> TimezoneMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TimezoneMode) {
        self.mode = mode;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Whether the last write of both collections reached the backend.
    pub fn is_persisted(&self) -> bool {
        self.entries.is_persisted() && self.templates.is_persisted()
    }

    /// Current time as a form value, in the local zone.
    pub fn default_timestamp_input(&self) -> String {
        timestamp_input(&self.clock.now(), self.entries.zone())
    }

    /// Display string for `entry` in the session's current mode.
    pub fn display_timestamp(&self, entry: &Entry) -> String {
        format_timestamp(&entry.timestamp, self.mode, self.entries.zone())
    }

    // --- Edit state machine ---

    /// Open `id` for editing, replacing any edit in progress.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::NotFound` if no entry has `id`; the state is
    /// left unchanged.
    pub fn begin_edit(&mut self, id: &EntryId) -> Result<EditForm> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| TimelogError::NotFound(format!("Entry {}", id)))?;

        let form = EditForm {
            entry_id: entry.id.clone(),
            timestamp: timestamp_input(&entry.timestamp, self.entries.zone()),
            description: if entry.is_quick() {
                String::new()
            } else {
                entry.description.clone()
            },
            notes: entry.notes.clone().unwrap_or_default(),
        };

        if let EditState::Editing(previous) = &self.state {
            if previous != id {
                debug!(previous = %previous, next = %id, "Switching edit target");
            }
        }
        self.state = EditState::Editing(id.clone());
        Ok(form)
    }

    /// Save the form over the entry being edited and return to idle.
    ///
    /// A timestamp equal to the one the form was opened with keeps the
    /// stored instant, including milliseconds and the DST fold pass.
    /// Validation failures keep the edit open so it can be retried. If the
    /// entry vanished in the meantime the edit is abandoned.
    pub fn commit_edit(
        &mut self,
        timestamp: &str,
        description: &str,
        notes: Option<&str>,
    ) -> Result<Entry> {
        let id = self
            .editing_id()
            .cloned()
            .ok_or_else(|| TimelogError::InvalidState("No entry is being edited".to_string()))?;

        let unchanged = self.entries.get(&id).and_then(|entry| {
            let shown = timestamp_input(&entry.timestamp, self.entries.zone());
            (timestamp.trim() == shown).then(|| canonical(&entry.timestamp))
        });
        let timestamp = unchanged.as_deref().unwrap_or(timestamp);

        match self.entries.update(&id, timestamp, description, notes) {
            Ok(entry) => {
                self.state = EditState::Idle;
                Ok(entry)
            }
            Err(err @ TimelogError::NotFound(_)) => {
                self.state = EditState::Idle;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Abandon the edit in progress without touching the store.
    pub fn cancel_edit(&mut self) {
        self.state = EditState::Idle;
    }

    // --- Creation ---

    /// Create an entry from the form. Only valid while idle.
    pub fn submit_new_entry(
        &mut self,
        timestamp_input: &str,
        description: &str,
        notes: Option<&str>,
    ) -> Result<Entry> {
        self.require_idle()?;
        self.entries.create(timestamp_input, description, notes)
    }

    /// Route a form submission: commit when editing, create otherwise.
    pub fn submit(&mut self, form: &FormInput) -> Result<Entry> {
        let notes = form.notes.as_deref();
        if self.editing_id().is_some() {
            self.commit_edit(&form.timestamp, &form.description, notes)
        } else {
            self.submit_new_entry(&form.timestamp, &form.description, notes)
        }
    }

    /// Create a placeholder entry and schedule opening it for editing.
    ///
    /// Only valid while idle. The edit is opened by the next
    /// [`run_follow_ups`](Self::run_follow_ups), not by this call.
    pub fn quick_capture(&mut self, timestamp_input: &str) -> Result<Entry> {
        self.require_idle()?;
        let entry = self.entries.create_quick(timestamp_input)?;
        self.follow_ups
            .push_back(FollowUp::OpenForEdit(entry.id.clone()));
        Ok(entry)
    }

    /// Quick capture at the clock's current time.
    pub fn capture_now(&mut self) -> Result<Entry> {
        let now = self.default_timestamp_input();
        self.quick_capture(&now)
    }

    pub fn has_pending_follow_ups(&self) -> bool {
        !self.follow_ups.is_empty()
    }

    /// Run scheduled follow-ups, returning the form of the last edit opened.
    ///
    /// Follow-ups whose entry was removed in the interim are dropped.
    pub fn run_follow_ups(&mut self) -> Option<EditForm> {
        let mut opened = None;
        while let Some(follow_up) = self.follow_ups.pop_front() {
            match follow_up {
                FollowUp::OpenForEdit(id) => match self.begin_edit(&id) {
                    Ok(form) => opened = Some(form),
                    Err(err) => debug!(id = %id, error = %err, "Dropping open-for-edit"),
                },
            }
        }
        opened
    }

    // --- Removal ---

    /// Delete an entry; absent ids are a no-op.
    ///
    /// Deleting the entry being edited ends the edit.
    pub fn delete_entry(&mut self, id: &EntryId) -> bool {
        if self.editing_id() == Some(id) {
            self.state = EditState::Idle;
        }
        self.entries.remove(id)
    }

    /// Remove every entry. Confirmation is the caller's job.
    pub fn clear_entries(&mut self) {
        self.state = EditState::Idle;
        self.entries.clear();
    }

    // --- Export ---

    /// CSV export named after today's date.
    pub fn export(&self) -> Result<CsvExport> {
        CsvExport::build(self.entries.list(), self.entries.zone(), &self.clock.now())
    }

    // --- Templates ---

    pub fn add_template(&mut self, name: &str) -> Result<Template> {
        self.templates.add(name)
    }

    pub fn delete_template(&mut self, id: &TemplateId) -> bool {
        self.templates.remove(id)
    }

    /// Description text for pre-filling the form from a template.
    pub fn use_template(&self, id: &TemplateId) -> Result<String> {
        self.templates
            .get(id)
            .map(|template| template.name.clone())
            .ok_or_else(|| TimelogError::NotFound(format!("Template {}", id)))
    }

    fn require_idle(&self) -> Result<()> {
        match &self.state {
            EditState::Idle => Ok(()),
            EditState::Editing(id) => Err(TimelogError::InvalidState(format!(
                "Entry {} is being edited; save or cancel it first",
                id
            ))),
        }
    }
}
