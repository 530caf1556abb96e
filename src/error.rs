// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Nothing here is fatal: every variant degrades one feature of the
//! session and leaves the rest usable.

use crate::models::ValidationError;
use crate::services::GeolocationError;
use crate::storage::StorageError;

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Map is not loaded")]
    MapUnavailable,

    #[error("No map point selected")]
    NoPendingPoint,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Alert shown when a submitted form does not validate.
    pub const INVALID_INPUT_NOTICE: &'static str = "Inputs have to be positive numbers!";

    /// Alert shown when the device position cannot be read.
    pub const POSITION_NOTICE: &'static str = "Could not get your position";

    /// The blocking notice the user should see for this error, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(_) => Some(Self::INVALID_INPUT_NOTICE),
            AppError::Geolocation(_) => Some(Self::POSITION_NOTICE),
            _ => None,
        }
    }
}

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, AppError>;
