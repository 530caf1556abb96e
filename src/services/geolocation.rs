// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Device position lookup.

use crate::models::Coordinates;
use std::future::Future;

/// Why the device position could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Permission to read the position was denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
///
/// Queried once per initialization; there is no retry or timeout.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>>;
}

/// Geolocator that always answers the same way.
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    result: Result<Coordinates, GeolocationError>,
}

impl FixedGeolocator {
    pub fn at(position: Coordinates) -> Self {
        Self {
            result: Ok(position),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self { result: Err(error) }
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.result.clone()
    }
}
