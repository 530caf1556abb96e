// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed access to the persisted workout list.

use super::KeyValueStore;
use crate::error::Result;
use crate::models::Workout;
use anyhow::Context;

/// Owns the single key that holds the serialized workout list.
#[derive(Debug, Clone)]
pub struct WorkoutStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Overwrite the stored list with `workouts`, derived fields included.
    pub fn save_all(&self, workouts: &[Workout]) -> Result<()> {
        let json = serde_json::to_string(workouts).context("Failed to serialize workouts")?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = workouts.len(), "Saved workouts");
        Ok(())
    }

    /// Load the stored list.
    ///
    /// A missing key or a document that is not a JSON array yields an empty
    /// list. Entries that fail to decode or break the workout invariants are
    /// skipped. Only a failing backend read is reported as an error.
    pub fn load_all(&self) -> Result<Vec<Workout>> {
        let Some(raw) = self.store.get(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored workouts");
            return Ok(Vec::new());
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored workouts are malformed; starting empty");
                return Ok(Vec::new());
            }
        };

        let total = entries.len();
        let workouts: Vec<Workout> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| decode_entry(index, entry))
            .collect();

        if workouts.len() < total {
            tracing::warn!(
                key = %self.key,
                loaded = workouts.len(),
                skipped = total - workouts.len(),
                "Skipped unusable stored workouts"
            );
        } else {
            tracing::debug!(key = %self.key, count = total, "Loaded workouts");
        }
        Ok(workouts)
    }

    /// Delete the stored list.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}

fn decode_entry(index: usize, entry: serde_json::Value) -> Option<Workout> {
    let workout: Workout = match serde_json::from_value(entry) {
        Ok(workout) => workout,
        Err(e) => {
            tracing::warn!(index, error = %e, "Stored workout does not decode");
            return None;
        }
    };
    if let Err(e) = workout.check_invariants() {
        tracing::warn!(index, id = workout.id(), error = %e, "Stored workout is invalid");
        return None;
    }
    Some(workout)
}
