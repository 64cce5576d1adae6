//! Intents reported by a UI and the capabilities a UI offers back.
//!
//! `SessionController::dispatch` is the single entry point for a UI: it
//! applies the intent, then calls back into the [`UiPort`] to re-render,
//! show or hide the form, ask for confirmation, or report an error. Errors
//! never escape `dispatch`; they are shown to the user through
//! [`UiPort::notify`] and control returns to the host's event loop.

use tracing::warn;

use crate::clock::LocalZone;
use crate::entries::{Entry, EntryId};
use crate::error::TimelogError;
use crate::export::CsvExport;
use crate::format::{format_timestamp, TimezoneMode};
use crate::session::{EditForm, SessionController};
use crate::templates::{Template, TemplateId};

const CLEAR_CONFIRMATION: &str =
    "Are you sure you want to clear all entries? This cannot be undone.";

/// Form fields a UI can focus or fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Timestamp,
    Description,
    Notes,
    TemplateName,
}

/// Submitted form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInput {
    pub timestamp: String,
    pub description: String,
    pub notes: Option<String>,
}

impl FormInput {
    pub fn new(timestamp: &str, description: &str, notes: Option<&str>) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            description: description.to_string(),
            notes: notes.map(str::to_string),
        }
    }
}

/// Category of a problem reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    NotFound,
    NothingToExport,
    InvalidState,
    Failure,
}

/// A problem reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn from_error(err: &TimelogError) -> Self {
        let kind = match err {
            TimelogError::Validation(_) => NoticeKind::Validation,
            TimelogError::NotFound(_) => NoticeKind::NotFound,
            TimelogError::EmptyCollection => NoticeKind::NothingToExport,
            TimelogError::InvalidState(_) => NoticeKind::InvalidState,
            _ => NoticeKind::Failure,
        };
        Self {
            kind,
            message: user_message(err),
        }
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit(FormInput),
    Cancel,
    Edit(EntryId),
    Delete(EntryId),
    QuickCapture(String),
    CaptureNow,
    ChangeTimezone(TimezoneMode),
    ClearAll,
    ExportRequested,
    AddTemplate(String),
    DeleteTemplate(TemplateId),
    UseTemplate(TemplateId),
}

/// Read-only snapshot handed to [`UiPort::render`].
pub struct View<'a> {
    pub entries: &'a [Entry],
    pub templates: &'a [Template],
    pub mode: TimezoneMode,
    pub zone: &'a LocalZone,
    pub editing: Option<&'a EntryId>,
}

impl View<'_> {
    /// Display string for `entry` in the view's mode.
    pub fn timestamp(&self, entry: &Entry) -> String {
        format_timestamp(&entry.timestamp, self.mode, self.zone)
    }
}

/// Presentation capabilities the controller calls into.
pub trait UiPort {
    fn render(&mut self, view: &View<'_>);
    fn request_confirmation(&mut self, message: &str) -> bool;
    fn show_form(&mut self, form: &EditForm);
    fn hide_form(&mut self);
    fn focus_field(&mut self, field: FormField);
    fn set_field(&mut self, field: FormField, value: &str);
    fn notify(&mut self, notice: &Notice);
    fn download(&mut self, export: &CsvExport);
}

impl SessionController {
    /// Snapshot of the current state for rendering.
    pub fn view(&self) -> View<'_> {
        View {
            entries: self.entries.list(),
            templates: self.templates.list(),
            mode: self.mode,
            zone: self.entries.zone(),
            editing: self.editing_id(),
        }
    }

    /// Apply `intent` and report the outcome to `ui`.
    pub fn dispatch(&mut self, intent: Intent, ui: &mut dyn UiPort) {
        match intent {
            Intent::Submit(form) => {
                let was_editing = self.editing_id().is_some();
                match self.submit(&form) {
                    Ok(_) => {
                        ui.render(&self.view());
                        ui.hide_form();
                        self.reset_timestamp_field(ui);
                    }
                    Err(err) => {
                        self.report(ui, &err);
                        if was_editing && self.editing_id().is_none() {
                            ui.hide_form();
                            self.reset_timestamp_field(ui);
                        }
                    }
                }
            }
            Intent::Cancel => {
                self.cancel_edit();
                ui.hide_form();
                self.reset_timestamp_field(ui);
            }
            Intent::Edit(id) => match self.begin_edit(&id) {
                Ok(form) => {
                    ui.show_form(&form);
                    ui.focus_field(FormField::Description);
                }
                Err(err) => self.report(ui, &err),
            },
            Intent::Delete(id) => {
                let was_editing = self.editing_id() == Some(&id);
                self.delete_entry(&id);
                ui.render(&self.view());
                if was_editing {
                    ui.hide_form();
                }
            }
            Intent::QuickCapture(timestamp) => {
                let result = self.quick_capture(&timestamp);
                self.after_capture(ui, result);
            }
            Intent::CaptureNow => {
                let result = self.capture_now();
                self.after_capture(ui, result);
            }
            Intent::ChangeTimezone(mode) => {
                self.set_mode(mode);
                ui.render(&self.view());
            }
            Intent::ClearAll => {
                if ui.request_confirmation(CLEAR_CONFIRMATION) {
                    let was_editing = self.editing_id().is_some();
                    self.clear_entries();
                    ui.render(&self.view());
                    if was_editing {
                        ui.hide_form();
                    }
                }
            }
            Intent::ExportRequested => match self.export() {
                Ok(export) => ui.download(&export),
                Err(err) => self.report(ui, &err),
            },
            Intent::AddTemplate(name) => match self.add_template(&name) {
                Ok(_) => {
                    ui.render(&self.view());
                    ui.set_field(FormField::TemplateName, "");
                    ui.focus_field(FormField::TemplateName);
                }
                Err(err) => self.report(ui, &err),
            },
            Intent::DeleteTemplate(id) => {
                self.delete_template(&id);
                ui.render(&self.view());
            }
            Intent::UseTemplate(id) => match self.use_template(&id) {
                Ok(description) => {
                    ui.set_field(FormField::Description, &description);
                    ui.focus_field(FormField::Description);
                }
                Err(err) => self.report(ui, &err),
            },
        }
    }

    /// Run deferred follow-ups; call once the render pass for the previous
    /// intent has completed.
    pub fn tick(&mut self, ui: &mut dyn UiPort) {
        if let Some(form) = self.run_follow_ups() {
            ui.show_form(&form);
            ui.focus_field(FormField::Description);
        }
    }

    fn after_capture(&mut self, ui: &mut dyn UiPort, result: crate::error::Result<Entry>) {
        match result {
            Ok(_) => {
                ui.render(&self.view());
                self.reset_timestamp_field(ui);
            }
            Err(err) => self.report(ui, &err),
        }
    }

    fn reset_timestamp_field(&self, ui: &mut dyn UiPort) {
        let now = self.default_timestamp_input();
        ui.set_field(FormField::Timestamp, &now);
    }

    fn report(&self, ui: &mut dyn UiPort, err: &TimelogError) {
        if !err.is_user_facing() {
            warn!(error = %err, "Intent failed");
        }
        ui.notify(&Notice::from_error(err));
    }
}

/// Message shown to the user for `err`.
pub fn user_message(err: &TimelogError) -> String {
    match err {
        TimelogError::Validation(message) | TimelogError::InvalidState(message) => {
            message.clone()
        }
        TimelogError::NotFound(what) => format!("{} not found", what),
        TimelogError::EmptyCollection => "No entries to download".to_string(),
        other => other.to_string(),
    }
}
