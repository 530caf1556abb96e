// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form and workout list collaborators.

use crate::models::{ActivityKind, WorkoutRow};

/// The workout entry form.
pub trait FormView {
    /// Reveal the form and focus the first input.
    fn show(&mut self);

    /// Empty every input and hide the form.
    fn hide_and_clear(&mut self);

    /// Show the cadence input for running or the elevation input for
    /// cycling, hiding the other.
    fn show_kind_fields(&mut self, kind: ActivityKind);

    /// Blocking notice to the user.
    fn alert(&mut self, message: &str);
}

/// The rendered workout list.
pub trait ListView {
    fn render_row(&mut self, row: &WorkoutRow);

    fn clear(&mut self);
}

/// UI handles injected into the session controller.
#[derive(Debug, Clone, Default)]
pub struct UiHandles<F, L> {
    pub form: F,
    pub list: L,
}

impl<F: FormView, L: ListView> UiHandles<F, L> {
    pub fn new(form: F, list: L) -> Self {
        Self { form, list }
    }
}

/// Form that records what it was told to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessForm {
    pub visible: bool,
    pub kind_fields: ActivityKind,
    pub alerts: Vec<String>,
}

impl Default for HeadlessForm {
    fn default() -> Self {
        Self {
            visible: false,
            kind_fields: ActivityKind::Running,
            alerts: Vec::new(),
        }
    }
}

impl FormView for HeadlessForm {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide_and_clear(&mut self) {
        self.visible = false;
    }

    fn show_kind_fields(&mut self, kind: ActivityKind) {
        self.kind_fields = kind;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// List that keeps rows in display order, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessList {
    pub rows: Vec<WorkoutRow>,
}

impl ListView for HeadlessList {
    fn render_row(&mut self, row: &WorkoutRow) {
        self.rows.insert(0, row.clone());
    }

    fn clear(&mut self) {
        self.rows.clear();
    }
}
