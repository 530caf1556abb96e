// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::storage::keys;
use std::env;
use std::path::PathBuf;

/// Zoom used when centering on the device and when panning to a workout.
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Key holding the serialized workout list
    pub storage_key: String,
    /// Map zoom level for centering and panning
    pub map_zoom: u8,
    /// Directory for the file-backed store (native hosts only)
    pub store_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: keys::WORKOUTS.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
            store_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let map_zoom = match env::var("WORKOUT_MAP_ZOOM") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::Invalid("WORKOUT_MAP_ZOOM", raw))?,
            Err(_) => DEFAULT_MAP_ZOOM,
        };

        Ok(Self {
            storage_key: env::var("WORKOUT_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| keys::WORKOUTS.to_string()),
            map_zoom,
            store_dir: env::var_os("WORKOUT_STORE_DIR").map(PathBuf::from),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
