// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Handles the core workflow:
//! 1. Restore the stored workout list and render its rows
//! 2. Locate the device, center the map and drop the stored markers
//! 3. Open the form on a map click
//! 4. Validate the submitted form and build the workout
//! 5. Render it, append it and overwrite the stored list

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    ActivityKind, Coordinates, MarkerView, RawWorkoutForm, Workout, WorkoutRow,
};
use crate::services::{FormView, Geolocator, ListView, MapView, UiHandles};
use crate::storage::{KeyValueStore, WorkoutStore};

/// Where the workout-creation flow stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    /// No map point selected.
    Idle,
    /// Form shown for the selected point.
    FormOpen { pending: Coordinates },
}

/// Owns the workout list for one session and keeps the map, the list view
/// and the store in step with it.
pub struct SessionController<M, F, L, S> {
    map: M,
    ui: UiHandles<F, L>,
    store: WorkoutStore<S>,
    map_zoom: u8,
    workouts: Vec<Workout>,
    state: FormState,
    map_loaded: bool,
}

impl<M, F, L, S> SessionController<M, F, L, S>
where
    M: MapView,
    F: FormView,
    L: ListView,
    S: KeyValueStore,
{
    /// Wire up the collaborators. Nothing is read or rendered until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(config: &Config, map: M, ui: UiHandles<F, L>, store: S) -> Self {
        Self {
            map,
            ui,
            store: WorkoutStore::new(store, config.storage_key.clone()),
            map_zoom: config.map_zoom,
            workouts: Vec::new(),
            state: FormState::Idle,
            map_loaded: false,
        }
    }

    /// Restore the stored list, then locate the device and load the map.
    ///
    /// List rows are rendered whether or not the position is found. If the
    /// lookup fails the user is alerted and the map stays unloaded for the
    /// rest of the session.
    pub async fn initialize<G: Geolocator>(&mut self, geolocator: &G) -> Result<Coordinates> {
        if let Err(e) = self.restore_all() {
            tracing::warn!(error = %e, "Could not read stored workouts; starting empty");
        }

        match geolocator.current_position().await {
            Ok(position) => {
                self.load_map(position);
                Ok(position)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not get device position");
                self.ui.form.alert(AppError::POSITION_NOTICE);
                Err(e.into())
            }
        }
    }

    fn load_map(&mut self, position: Coordinates) {
        self.map_loaded = true;
        self.map.center_on(position, self.map_zoom);
        self.map.clear_markers();
        for workout in &self.workouts {
            self.map.place_marker(&MarkerView::for_workout(workout));
        }
        tracing::info!(
            lat = position.lat,
            lng = position.lng,
            markers = self.workouts.len(),
            "Map loaded"
        );
    }

    /// A point on the map was clicked: hold it and open the form.
    ///
    /// Selecting again while the form is open replaces the pending point.
    pub fn select_point(&mut self, coordinates: Coordinates) -> Result<()> {
        if !self.map_loaded {
            return Err(AppError::MapUnavailable);
        }
        self.state = FormState::FormOpen {
            pending: coordinates,
        };
        self.ui.form.show();
        tracing::debug!(lat = coordinates.lat, lng = coordinates.lng, "Point selected");
        Ok(())
    }

    /// The activity selector changed. Only field visibility is affected.
    pub fn select_kind(&mut self, kind: ActivityKind) {
        self.ui.form.show_kind_fields(kind);
    }

    /// Drop the pending point and close the form.
    pub fn cancel_form(&mut self) {
        self.state = FormState::Idle;
        self.ui.form.hide_and_clear();
    }

    /// Validate a submitted form and add the workout it describes.
    ///
    /// On invalid input the user is alerted and the form stays open on the
    /// same point. A failed store write is logged; the workout is kept.
    pub fn submit_form(&mut self, form: &RawWorkoutForm) -> Result<&Workout> {
        let FormState::FormOpen { pending } = self.state else {
            return Err(AppError::NoPendingPoint);
        };

        let built = form.parse().and_then(|submission| {
            Workout::new(
                pending,
                submission.distance_km,
                submission.duration_min,
                submission.extra,
            )
        });
        let workout = match built {
            Ok(workout) => workout,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected workout form");
                self.ui.form.alert(AppError::INVALID_INPUT_NOTICE);
                return Err(e.into());
            }
        };

        tracing::info!(
            id = workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "Workout added"
        );

        self.map.place_marker(&MarkerView::for_workout(&workout));
        self.ui.list.render_row(&WorkoutRow::for_workout(&workout));
        self.ui.form.hide_and_clear();
        self.state = FormState::Idle;

        let index = self.workouts.len();
        self.workouts.push(workout);
        self.persist_or_log();
        Ok(&self.workouts[index])
    }

    /// A list row was clicked: pan to its workout and count the interaction.
    ///
    /// Unknown ids are ignored. Panning is skipped while the map is unloaded.
    pub fn select_from_list(&mut self, row_id: &str) -> Option<&Workout> {
        let Some(index) = self.workouts.iter().position(|w| w.id() == row_id) else {
            tracing::debug!(row_id, "No workout for selected row");
            return None;
        };

        if self.map_loaded {
            self.map
                .center_on(self.workouts[index].coordinates(), self.map_zoom);
        }
        self.workouts[index].activate();
        self.persist_or_log();
        Some(&self.workouts[index])
    }

    /// Overwrite the stored list with the in-memory one.
    pub fn persist_all(&self) -> Result<()> {
        self.store.save_all(&self.workouts)
    }

    /// Replace the in-memory list with the stored one and redraw it.
    ///
    /// Returns how many workouts were restored. Stored records are used
    /// as-is; nothing is recomputed.
    pub fn restore_all(&mut self) -> Result<usize> {
        self.workouts = self.store.load_all()?;

        self.ui.list.clear();
        for workout in &self.workouts {
            self.ui.list.render_row(&WorkoutRow::for_workout(workout));
        }
        if self.map_loaded {
            self.map.clear_markers();
            for workout in &self.workouts {
                self.map.place_marker(&MarkerView::for_workout(workout));
            }
        }

        tracing::info!(count = self.workouts.len(), "Workouts restored");
        Ok(self.workouts.len())
    }

    /// Forget every workout, stored and in memory, and return to idle.
    pub fn reset_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.workouts.clear();
        self.map.clear_markers();
        self.ui.list.clear();
        self.ui.form.hide_and_clear();
        self.state = FormState::Idle;
        tracing::info!("Session reset");
        Ok(())
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist_all() {
            tracing::error!(error = %e, "Failed to save workouts");
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_map_loaded(&self) -> bool {
        self.map_loaded
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn ui(&self) -> &UiHandles<F, L> {
        &self.ui
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }
}
