//! Storage layer for Timelog.
//!
//! This module provides:
//! - The `KeyValueStore` trait (string values under string keys)
//! - Backends: SQLite (on disk) and in-memory
//! - The `PersistenceGateway` that mirrors whole collections into a backend

mod gateway;
mod memory;
mod sqlite;
pub mod timestamp;
mod traits;

pub use gateway::{PersistenceGateway, ENTRIES_KEY, TEMPLATES_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;
