//! Terminal implementation of the session's UI port.
//!
//! A command builds a [`TerminalUi`], dispatches intents to the session and
//! then inspects what the session asked the UI to do: the form it opened,
//! the fields it filled, the notice it raised or the export it handed over.

mod context;
mod mode;
pub mod render;
mod theme;
mod views;

use std::path::PathBuf;

use dialoguer::Confirm;
use tracing::debug;

use timelog_core::{CsvExport, EditForm, FormField, Notice, NoticeKind, UiPort, View};

use crate::errors::CliError;

pub use context::UiContext;
pub use theme::Badge;

/// What a render call prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listing {
    /// Print nothing; the command prints its own receipt
    #[default]
    Silent,
    Entries { limit: Option<usize> },
    Templates,
}

/// Where a CSV export goes.
#[derive(Debug, Clone)]
pub enum ExportTarget {
    Directory(PathBuf),
    Stdout,
}

pub struct TerminalUi {
    ctx: UiContext,
    listing: Listing,
    assume_yes: bool,
    export_target: ExportTarget,
    form: Option<EditForm>,
    fields: Vec<(FormField, String)>,
    notice: Option<Notice>,
    confirmed: Option<bool>,
    exported: Option<PathBuf>,
}

impl TerminalUi {
    pub fn new(ctx: UiContext) -> Self {
        Self {
            ctx,
            listing: Listing::Silent,
            assume_yes: false,
            export_target: ExportTarget::Stdout,
            form: None,
            fields: Vec::new(),
            notice: None,
            confirmed: None,
            exported: None,
        }
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = listing;
        self
    }

    /// Answer yes to confirmation prompts without asking.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn with_export_target(mut self, target: ExportTarget) -> Self {
        self.export_target = target;
        self
    }

    pub fn ctx(&self) -> &UiContext {
        &self.ctx
    }

    /// Turn a pending notice into an error; `hint` is attached to
    /// not-found notices.
    pub fn check(&mut self, hint: &str) -> Result<(), CliError> {
        match self.notice.take() {
            Some(notice) => Err(CliError::from_notice(&notice, hint)),
            None => Ok(()),
        }
    }

    /// The form the session opened, if it is still shown.
    pub fn take_form(&mut self) -> Option<EditForm> {
        self.form.take()
    }

    /// Latest value the session put into `field`.
    pub fn field(&self, field: FormField) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }

    /// Answer to the last confirmation prompt, if one was shown.
    pub fn confirmed(&self) -> Option<bool> {
        self.confirmed
    }

    /// File written by the last export.
    pub fn exported(&self) -> Option<&PathBuf> {
        self.exported.as_ref()
    }

    fn write_export(&self, export: &CsvExport) -> std::io::Result<Option<PathBuf>> {
        match &self.export_target {
            ExportTarget::Stdout => {
                println!("{}", export.content);
                Ok(None)
            }
            ExportTarget::Directory(dir) => {
                std::fs::create_dir_all(dir)?;
                let path = dir.join(&export.filename);
                std::fs::write(&path, &export.content)?;
                Ok(Some(path))
            }
        }
    }
}

impl UiPort for TerminalUi {
    fn render(&mut self, view: &View<'_>) {
        match self.listing {
            Listing::Silent => {
                debug!(entries = view.entries.len(), mode = %view.mode, "Render skipped");
            }
            Listing::Entries { limit } => {
                let out = views::entries(&self.ctx, view, limit);
                if !out.is_empty() {
                    println!("{}", out);
                }
            }
            Listing::Templates => {
                let out = views::templates(&self.ctx, view.templates);
                if !out.is_empty() {
                    println!("{}", out);
                }
            }
        }
    }

    fn request_confirmation(&mut self, message: &str) -> bool {
        let answer = if self.assume_yes {
            true
        } else if self.ctx.interactive {
            Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
                .unwrap_or(false)
        } else {
            debug!("Confirmation needed but input is not a terminal");
            false
        };
        self.confirmed = Some(answer);
        answer
    }

    fn show_form(&mut self, form: &EditForm) {
        self.form = Some(form.clone());
    }

    fn hide_form(&mut self) {
        self.form = None;
    }

    fn focus_field(&mut self, field: FormField) {
        debug!(?field, "Focus");
    }

    fn set_field(&mut self, field: FormField, value: &str) {
        self.fields.push((field, value.to_string()));
    }

    fn notify(&mut self, notice: &Notice) {
        if self.notice.is_none() {
            self.notice = Some(notice.clone());
        }
    }

    fn download(&mut self, export: &CsvExport) {
        debug!(filename = %export.filename, mime = export.mime, "Export ready");
        match self.write_export(export) {
            Ok(path) => self.exported = path,
            Err(err) => self.notify(&Notice {
                kind: NoticeKind::Failure,
                message: format!("Failed to write {}: {}", export.filename, err),
            }),
        }
    }
}
