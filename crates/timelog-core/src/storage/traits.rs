//! Key-value backend trait definition.
//!
//! The `KeyValueStore` trait is the only thing the rest of the crate knows
//! about where data lives. Backends hold string values under string keys;
//! they offer no transactions and no change notification.

use crate::error::Result;

/// String-valued key-value persistence.
///
/// Implementations must ensure:
/// - A failed `set` leaves the previous value for that key in place
/// - `get` of a key never written returns `Ok(None)`
///
/// Methods take `&self`; backends needing mutation use interior mutability,
/// which is sound because a session runs on a single thread.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::Storage` if:
    /// - The value exceeds the backend's quota
    /// - The backend cannot be written
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
