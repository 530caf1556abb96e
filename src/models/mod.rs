// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod form;
pub mod view;
pub mod workout;

pub use form::{RawWorkoutForm, WorkoutSubmission};
pub use view::{MarkerView, RowDetail, WorkoutRow};
pub use workout::{
    ActivityKind, Coordinates, ValidationError, Workout, WorkoutDetails, WorkoutExtra,
};
