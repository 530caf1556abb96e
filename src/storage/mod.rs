// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local key-value persistence.
//!
//! The browser host backs [`KeyValueStore`] with `localStorage`; native
//! hosts and tests use [`MemoryStore`] or [`FileStore`]. The whole workout
//! list lives under one key and is rewritten in full on every change.

pub mod file;
pub mod memory;
pub mod workouts;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use workouts::WorkoutStore;

/// Well-known keys.
pub mod keys {
    pub const WORKOUTS: &str = "workouts";
}

/// String key-value store scoped to one origin.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
