// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw workout form values and their parsing.

use crate::models::workout::{ActivityKind, ValidationError, WorkoutExtra};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Field values exactly as the form reports them on submit.
///
/// Only the field matching `kind` is read; the hidden one is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RawWorkoutForm {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

/// Numbers parsed out of a [`RawWorkoutForm`].
///
/// Range checks happen when the workout is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSubmission {
    pub distance_km: f64,
    pub duration_min: f64,
    pub extra: WorkoutExtra,
}

impl RawWorkoutForm {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: ActivityKind::Running.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: ActivityKind::Cycling.as_str().to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }

    /// Parse the kind and the numeric fields it needs.
    pub fn parse(&self) -> Result<WorkoutSubmission, ValidationError> {
        let kind: ActivityKind = self.kind.parse()?;
        let distance_km = parse_number("distance", &self.distance)?;
        let duration_min = parse_number("duration", &self.duration)?;
        let extra = match kind {
            ActivityKind::Running => WorkoutExtra::Cadence(parse_number("cadence", &self.cadence)?),
            ActivityKind::Cycling => {
                WorkoutExtra::ElevationGain(parse_elevation(&self.elevation)?)
            }
        };

        Ok(WorkoutSubmission {
            distance_km,
            duration_min,
            extra,
        })
    }
}

/// A blank elevation is a flat ride.
fn parse_elevation(raw: &str) -> Result<f64, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    parse_number("elevation", raw)
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            raw: raw.to_string(),
        })
}
