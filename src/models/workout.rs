// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout records with derived pace/speed and a display description.
//!
//! A [`Workout`] is immutable once built, apart from its interaction
//! counter. Derived fields are computed exactly once in [`Workout::new_at`]
//! and are stored alongside the raw inputs, so a record loaded back from
//! storage carries the same description and metrics it was saved with.

use crate::time_utils::{self, rfc3339_millis};
use chrono::{DateTime, Datelike, FixedOffset, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Ids are the trailing ten digits of a millisecond timestamp.
const ID_MODULUS: i64 = 10_000_000_000;

/// Last millisecond value handed out as an id in this process.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

// ─── Coordinates ─────────────────────────────────────────────

/// A `[latitude, longitude]` pair, stored as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coordinates> for geo::Point<f64> {
    /// GeoJSON order: x is longitude, y is latitude.
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

// ─── Activity Kind ───────────────────────────────────────────

/// The closed set of activity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Cycling,
}

impl ActivityKind {
    /// Tag used in storage and form values.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Cycling => "cycling",
        }
    }

    /// Tag with its first letter upper-cased ("Running").
    pub fn display_name(self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(ActivityKind::Running),
            "cycling" => Ok(ActivityKind::Cycling),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

// ─── Inputs & Details ────────────────────────────────────────

/// The kind-specific value supplied when building a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutExtra {
    /// Running cadence in steps per minute.
    Cadence(f64),
    /// Cycling elevation gain in meters.
    ElevationGain(f64),
}

impl WorkoutExtra {
    pub fn kind(&self) -> ActivityKind {
        match self {
            WorkoutExtra::Cadence(_) => ActivityKind::Running,
            WorkoutExtra::ElevationGain(_) => ActivityKind::Cycling,
        }
    }
}

/// Kind-specific stored fields, tagged by `activityKind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(
    tag = "activityKind",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        /// Minutes per kilometer (lower is faster)
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        /// Kilometers per hour (higher is faster)
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> ActivityKind {
        match self {
            WorkoutDetails::Running { .. } => ActivityKind::Running,
            WorkoutDetails::Cycling { .. } => ActivityKind::Cycling,
        }
    }
}

// ─── Workout ─────────────────────────────────────────────────

/// One logged activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Session-unique token, also the list row and marker key
    id: String,
    /// Creation time with the user's UTC offset (RFC3339, milliseconds)
    #[serde(with = "rfc3339_millis")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    created_at: DateTime<FixedOffset>,
    /// `[lat, lng]`
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    /// "Running on Apr 14"
    description: String,
    #[serde(default)]
    interaction_count: u32,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// Build a workout stamped with the current local time.
    pub fn new(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: WorkoutExtra,
    ) -> Result<Self, ValidationError> {
        Self::new_at(
            time_utils::now_local_millis(),
            coordinates,
            distance_km,
            duration_min,
            extra,
        )
    }

    /// Build a workout with an explicit creation time.
    ///
    /// Rejects non-finite values anywhere, non-positive distance, duration
    /// or cadence, and negative elevation gain.
    pub fn new_at(
        created_at: DateTime<FixedOffset>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: WorkoutExtra,
    ) -> Result<Self, ValidationError> {
        if !coordinates.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "coordinates",
            });
        }
        let distance_km = require_positive("distance", distance_km)?;
        let duration_min = require_positive("duration", duration_min)?;

        let details = match extra {
            WorkoutExtra::Cadence(cadence) => WorkoutDetails::Running {
                cadence_spm: require_positive("cadence", cadence)?,
                pace_min_per_km: duration_min / distance_km,
            },
            WorkoutExtra::ElevationGain(elevation) => WorkoutDetails::Cycling {
                elevation_gain_m: require_non_negative("elevation", elevation)?,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        };

        let created_at = created_at.trunc_subsecs(3);
        Ok(Self {
            id: next_id(&created_at),
            description: describe(details.kind(), &created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            interaction_count: 0,
            details,
        })
    }

    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            coordinates,
            distance_km,
            duration_min,
            WorkoutExtra::Cadence(cadence_spm),
        )
    }

    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            coordinates,
            distance_km,
            duration_min,
            WorkoutExtra::ElevationGain(elevation_gain_m),
        )
    }

    /// Record one interaction (e.g. the list row was selected).
    pub fn activate(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    /// Re-check the construction invariants on a record that did not come
    /// through [`Workout::new_at`] (i.e. one loaded from storage).
    pub fn check_invariants(&self) -> Result<(), ValidationError> {
        if !self.coordinates.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "coordinates",
            });
        }
        require_positive("distance", self.distance_km)?;
        require_positive("duration", self.duration_min)?;
        match self.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                require_positive("cadence", cadence_spm)?;
                require_positive("pace", pace_min_per_km)?;
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                require_non_negative("elevation", elevation_gain_m)?;
                require_positive("speed", speed_km_per_h)?;
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn kind(&self) -> ActivityKind {
        self.details.kind()
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub fn cadence_spm(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { cadence_spm, .. } => Some(cadence_spm),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => Some(elevation_gain_m),
            WorkoutDetails::Running { .. } => None,
        }
    }
}

/// Build "<Kind> on <Mon> <day>" from the creation date.
fn describe(kind: ActivityKind, created_at: &DateTime<FixedOffset>) -> String {
    format!(
        "{} on {} {}",
        kind.display_name(),
        MONTHS[created_at.month0() as usize],
        created_at.day()
    )
}

/// Hand out the next id: the creation millisecond, bumped past the last
/// issued value so two workouts in the same millisecond never collide.
fn next_id(created_at: &DateTime<FixedOffset>) -> String {
    let millis = created_at.timestamp_millis();
    let previous = LAST_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(millis.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    let issued = millis.max(previous + 1);
    format!("{:010}", issued.rem_euclid(ID_MODULUS))
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}

fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

/// Rejected workout input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("Unknown activity kind: {0:?}")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn april_14() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 4, 14, 9, 30, 0)
            .unwrap()
    }

    fn lisbon() -> Coordinates {
        Coordinates::new(39.0, -12.0)
    }

    #[test]
    fn test_running_pace_scenario() {
        let run = Workout::running(lisbon(), 5.2, 20.0, 178.0).unwrap();
        let pace = run.pace_min_per_km().unwrap();
        assert_eq!(pace, 20.0 / 5.2);
        assert!((pace - 3.846).abs() < 1e-3);
        assert_eq!(run.speed_km_per_h(), None);
        assert_eq!(run.kind(), ActivityKind::Running);
    }

    #[test]
    fn test_cycling_speed_scenario() {
        let ride = Workout::cycling(lisbon(), 27.0, 95.0, 523.0).unwrap();
        let speed = ride.speed_km_per_h().unwrap();
        assert_eq!(speed, 27.0 / (95.0 / 60.0));
        assert!((speed - 17.05).abs() < 1e-2);
        assert_eq!(ride.pace_min_per_km(), None);
        assert_eq!(ride.elevation_gain_m(), Some(523.0));
    }

    #[test]
    fn test_description_format() {
        let run = Workout::new_at(april_14(), lisbon(), 5.0, 25.0, WorkoutExtra::Cadence(170.0))
            .unwrap();
        assert_eq!(run.description(), "Running on Apr 14");

        let january = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
            .unwrap();
        let ride = Workout::new_at(january, lisbon(), 20.0, 60.0, WorkoutExtra::ElevationGain(0.0))
            .unwrap();
        assert_eq!(ride.description(), "Cycling on Jan 3");
    }

    #[test]
    fn test_description_uses_recorded_offset() {
        // 23:30 UTC on Dec 31 is already Jan 1 at +02:00
        let late = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 1, 30, 0)
            .unwrap();
        let run = Workout::new_at(late, lisbon(), 5.0, 25.0, WorkoutExtra::Cadence(170.0)).unwrap();
        assert_eq!(run.description(), "Running on Jan 1");
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let cases = [
            (0.0, 20.0, 170.0),
            (-1.0, 20.0, 170.0),
            (5.0, 0.0, 170.0),
            (5.0, -3.0, 170.0),
            (f64::NAN, 20.0, 170.0),
            (5.0, f64::INFINITY, 170.0),
            (5.0, 20.0, 0.0),
            (5.0, 20.0, -170.0),
            (5.0, 20.0, f64::NAN),
        ];
        for (distance, duration, cadence) in cases {
            assert!(
                Workout::running(lisbon(), distance, duration, cadence).is_err(),
                "accepted running({distance}, {duration}, {cadence})"
            );
        }
    }

    #[test]
    fn test_rejection_names_the_field() {
        let err = Workout::running(lisbon(), 5.0, 20.0, 0.0).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { field: "cadence" });

        let err = Workout::cycling(lisbon(), f64::NAN, 20.0, 10.0).unwrap_err();
        assert_eq!(err, ValidationError::NotFinite { field: "distance" });
    }

    #[test]
    fn test_cycling_elevation_policy() {
        assert!(Workout::cycling(lisbon(), 10.0, 30.0, 0.0).is_ok());
        assert_eq!(
            Workout::cycling(lisbon(), 10.0, 30.0, -5.0).unwrap_err(),
            ValidationError::Negative { field: "elevation" }
        );
        assert_eq!(
            Workout::cycling(lisbon(), 10.0, 30.0, f64::INFINITY).unwrap_err(),
            ValidationError::NotFinite { field: "elevation" }
        );
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let err = Workout::running(Coordinates::new(f64::NAN, 0.0), 5.0, 20.0, 170.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotFinite {
                field: "coordinates"
            }
        );
    }

    #[test]
    fn test_activate_counts_every_call() {
        let mut run = Workout::running(lisbon(), 5.0, 20.0, 170.0).unwrap();
        assert_eq!(run.interaction_count(), 0);
        for _ in 0..7 {
            run.activate();
        }
        assert_eq!(run.interaction_count(), 7);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let a = Workout::new_at(april_14(), lisbon(), 5.0, 20.0, WorkoutExtra::Cadence(170.0))
            .unwrap();
        let b = Workout::new_at(april_14(), lisbon(), 5.0, 20.0, WorkoutExtra::Cadence(170.0))
            .unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().len(), 10);
        assert!(a.id().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_activity_kind_parsing() {
        assert_eq!("running".parse::<ActivityKind>(), Ok(ActivityKind::Running));
        assert_eq!(" cycling ".parse::<ActivityKind>(), Ok(ActivityKind::Cycling));
        assert_eq!(
            "swimming".parse::<ActivityKind>(),
            Err(ValidationError::UnknownKind("swimming".to_string()))
        );
        assert_eq!(ActivityKind::Cycling.display_name(), "Cycling");
    }

    #[test]
    fn test_serialized_shape() {
        let run = Workout::new_at(april_14(), lisbon(), 5.2, 20.0, WorkoutExtra::Cadence(178.0))
            .unwrap();
        let value = serde_json::to_value(&run).unwrap();

        assert_eq!(value["activityKind"], "running");
        assert_eq!(value["coordinates"], serde_json::json!([39.0, -12.0]));
        assert_eq!(value["distanceKm"], 5.2);
        assert_eq!(value["durationMin"], 20.0);
        assert_eq!(value["cadenceSpm"], 178.0);
        assert_eq!(value["paceMinPerKm"], 20.0 / 5.2);
        assert_eq!(value["description"], "Running on Apr 14");
        assert_eq!(value["createdAt"], "2024-04-14T09:30:00.000Z");
        assert_eq!(value["interactionCount"], 0);
        assert_eq!(value["id"], run.id());
    }

    #[test]
    fn test_deserialize_keeps_stored_derived_fields() {
        // Stored description and speed disagree with what a fresh build
        // would compute; loading must keep them as-is.
        let json = r#"{
            "id": "1234567890",
            "createdAt": "2024-04-14T09:30:00.000Z",
            "coordinates": [39.0, -12.0],
            "distanceKm": 27.0,
            "durationMin": 95.0,
            "description": "Cycling on March 2",
            "interactionCount": 3,
            "activityKind": "cycling",
            "elevationGainM": 523.0,
            "speedKmPerH": 17.0
        }"#;
        let ride: Workout = serde_json::from_str(json).unwrap();

        assert_eq!(ride.id(), "1234567890");
        assert_eq!(ride.description(), "Cycling on March 2");
        assert_eq!(ride.speed_km_per_h(), Some(17.0));
        assert_eq!(ride.interaction_count(), 3);
        assert_eq!(ride.kind(), ActivityKind::Cycling);
        assert!(ride.check_invariants().is_ok());
    }

    #[test]
    fn test_check_invariants_flags_bad_stored_record() {
        let json = r#"{
            "id": "1",
            "createdAt": "2024-04-14T09:30:00.000Z",
            "coordinates": [39.0, -12.0],
            "distanceKm": -4.0,
            "durationMin": 20.0,
            "description": "Running on Apr 14",
            "activityKind": "running",
            "cadenceSpm": 170.0,
            "paceMinPerKm": 5.0
        }"#;
        let run: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(run.interaction_count(), 0);
        assert_eq!(
            run.check_invariants(),
            Err(ValidationError::NotPositive { field: "distance" })
        );
    }
}
