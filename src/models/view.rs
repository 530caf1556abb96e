// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! What the map and list collaborators are asked to draw.

use crate::models::workout::{ActivityKind, Coordinates, Workout, WorkoutDetails};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const RUNNING_ICON: &str = "🏃‍♂️";
pub const CYCLING_ICON: &str = "🚴‍♀️";

fn kind_icon(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Running => RUNNING_ICON,
        ActivityKind::Cycling => CYCLING_ICON,
    }
}

/// A map marker with its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    pub workout_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coordinates: Coordinates,
    /// Icon followed by the workout description
    pub popup_content: String,
    /// "running-popup" or "cycling-popup"
    pub style_class: String,
}

impl MarkerView {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            workout_id: workout.id().to_string(),
            coordinates: workout.coordinates(),
            popup_content: format!("{} {}", kind_icon(kind), workout.description()),
            style_class: format!("{}-popup", kind.as_str()),
        }
    }
}

/// One value in a list row, e.g. `⏱ 20 min`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct RowDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl RowDetail {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// A workout list entry, keyed by workout id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutRow {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub details: Vec<RowDetail>,
}

impl WorkoutRow {
    /// Pace and speed are shown with one decimal; everything else as stored.
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut details = vec![
            RowDetail::new(kind_icon(kind), workout.distance_km().to_string(), "km"),
            RowDetail::new("⏱", workout.duration_min().to_string(), "min"),
        ];

        match *workout.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                details.push(RowDetail::new("⚡️", format!("{pace_min_per_km:.1}"), "min/km"));
                details.push(RowDetail::new("🦶🏼", cadence_spm.to_string(), "spm"));
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                details.push(RowDetail::new("⚡️", format!("{speed_km_per_h:.1}"), "km/h"));
                details.push(RowDetail::new("⛰", elevation_gain_m.to_string(), "m"));
            }
        }

        Self {
            id: workout.id().to_string(),
            kind,
            title: workout.description().to_string(),
            details,
        }
    }
}
