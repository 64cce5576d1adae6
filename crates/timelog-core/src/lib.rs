//! # Timelog Core
//!
//! Core library for Timelog - a small, local-first activity log.
//!
//! This crate provides the domain logic, persistence abstractions, and data
//! models independent of any user interface. A front-end (the CLI, or any
//! other host) drives a [`SessionController`] and renders from its stores.
//!
//! ## Architecture
//!
//! - **format**: Timestamp display, HTML and CSV escaping
//! - **clock**: Injected current-time source and local zone
//! - **storage**: Key-value backends and the persistence gateway
//! - **entries**: Time entry collection (newest first)
//! - **templates**: Reusable description templates
//! - **export**: CSV export document
//! - **session**: Edit state machine and intent dispatch

pub mod clock;
pub mod entries;
pub mod error;
pub mod export;
pub mod format;
pub mod session;
pub mod storage;
pub mod templates;

pub use clock::{Clock, FixedClock, LocalZone, SystemClock};
pub use entries::{Entry, EntryId, EntryStore, QUICK_ENTRY_DESCRIPTION};
pub use error::{Result, TimelogError};
pub use export::CsvExport;
pub use format::TimezoneMode;
pub use session::{
    user_message, EditForm, EditState, FormField, FormInput, Intent, Notice, NoticeKind,
    SessionController, UiPort, View,
};
pub use storage::{KeyValueStore, MemoryStore, PersistenceGateway, SqliteStore};
pub use templates::{Template, TemplateId, TemplateStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
