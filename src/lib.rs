// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: log runs and rides against points on a map
//!
//! This crate provides the core of a map-based workout log: the workout
//! model with its derived pace/speed, and the session controller that keeps
//! the workout list, the map markers, the list view and local storage in
//! step. Position lookup, map drawing and form handling are supplied by the
//! host through the traits in [`services`].

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod telemetry;
pub mod time_utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::{ActivityKind, Coordinates, RawWorkoutForm, Workout};
pub use services::SessionController;
