// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_tracker::config::Config;
use workout_tracker::models::Coordinates;
use workout_tracker::services::{
    FixedGeolocator, GeoJsonMap, HeadlessForm, HeadlessList, SessionController, UiHandles,
};
use workout_tracker::storage::{KeyValueStore, StorageError};
use workout_tracker::storage::MemoryStore;

pub type TestSession<S = MemoryStore> = SessionController<GeoJsonMap, HeadlessForm, HeadlessList, S>;

/// Position reported by the test geolocator.
#[allow(dead_code)]
pub fn home() -> Coordinates {
    Coordinates::new(39.0, -12.0)
}

/// Create a session over `store` with default config and headless UI.
#[allow(dead_code)]
pub fn session_with_store<S: KeyValueStore>(store: S) -> TestSession<S> {
    SessionController::new(
        &Config::default(),
        GeoJsonMap::new(),
        UiHandles::default(),
        store,
    )
}

/// Create a session and run initialization with a working geolocator.
#[allow(dead_code)]
pub async fn initialized_session<S: KeyValueStore>(store: S) -> TestSession<S> {
    let mut session = session_with_store(store);
    session
        .initialize(&FixedGeolocator::at(home()))
        .await
        .expect("Initialization should succeed");
    session
}

/// Store whose reads or writes fail on demand; everything else goes to the
/// wrapped [`MemoryStore`].
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_get: bool,
    pub fail_set: bool,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn failing_reads(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_get: true,
            fail_set: false,
        }
    }

    pub fn failing_writes(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_get: false,
            fail_set: true,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_get {
            return Err(StorageError::Io("read refused".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_set {
            return Err(StorageError::Io("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
