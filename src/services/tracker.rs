// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracker session: ledger, marker layer and storage wired together.
//!
//! Each operation corresponds to one user action (submit, edit, delete,
//! sort, select, reset). It mutates the ledger, keeps the map markers in
//! step with the list, persists, and produces the notice to show. A failed
//! operation leaves the ledger and markers as they were.

use crate::db::{collections, KeyValueStore, SharedStore};
use crate::error::{AppError, Result};
use crate::models::{NewWorkout, Notice, WorkoutEdit, WorkoutView};
use crate::services::geolocation::Geolocator;
use crate::services::ledger::{Ledger, SortCriterion};
use crate::services::map::{MapView, MarkerLayer};
use crate::services::render::WorkoutRenderer;

pub struct Tracker {
    ledger: Ledger,
    map: MarkerLayer,
    store: SharedStore,
    renderer: WorkoutRenderer,
}

impl Tracker {
    /// Restore saved workouts and center the map on the current position.
    pub fn load(store: SharedStore, zoom: u8, position: &impl Geolocator) -> Result<Self> {
        let ledger = Ledger::restore(&store)?;
        let mut map = MarkerLayer::new(zoom);

        match position.current_position() {
            Ok(coords) => map.center_on(coords),
            Err(e) => tracing::error!(error = %e, "Could not determine starting position"),
        }

        let mut tracker = Self {
            ledger,
            map,
            store,
            renderer: WorkoutRenderer::new()?,
        };
        tracker.refresh_markers()?;
        Ok(tracker)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn map(&self) -> &MarkerLayer {
        &self.map
    }

    pub fn views(&self) -> Vec<WorkoutView> {
        self.ledger.list().iter().map(WorkoutView::from).collect()
    }

    pub fn get(&self, id: &str) -> Option<WorkoutView> {
        self.ledger.get(id).map(WorkoutView::from)
    }

    pub fn add(&mut self, input: NewWorkout) -> Result<(WorkoutView, Notice)> {
        let view = self.commit(|ledger| ledger.add(input).map(WorkoutView::from))?;

        tracing::info!(id = %view.id, "Workout added");
        let notice = Notice::success(format!("{} successfully added!", view.description));
        Ok((view, notice))
    }

    pub fn edit(&mut self, id: &str, edit: WorkoutEdit) -> Result<(WorkoutView, Notice)> {
        let view = self.commit(|ledger| ledger.edit(id, edit).map(WorkoutView::from))?;

        tracing::info!(id, "Workout updated");
        let notice = Notice::success(format!("{} successfully updated!", view.description));
        Ok((view, notice))
    }

    pub fn delete(&mut self, id: &str) -> Result<Notice> {
        let removed = self.commit(|ledger| {
            ledger
                .remove(id)
                .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
        })?;

        tracing::info!(id, "Workout deleted");
        Ok(Notice::success(format!(
            "Workout \"{}\" was successfully deleted.",
            removed.description()
        )))
    }

    pub fn sort(&mut self, criterion: SortCriterion) -> Result<()> {
        self.commit(|ledger| {
            ledger.sort(criterion);
            Ok(())
        })
    }

    /// Center the map on a workout and count the click.
    pub fn select(&mut self, id: &str) -> Result<WorkoutView> {
        let view = self.commit(|ledger| ledger.select(id).map(WorkoutView::from))?;
        self.map.center_on(view.coords);
        Ok(view)
    }

    /// Drop every workout and the stored collection.
    pub fn reset(&mut self) -> Result<Notice> {
        self.store.remove(collections::WORKOUTS)?;
        let count = self.ledger.len();
        self.ledger.clear();
        self.map.clear_markers();

        tracing::info!(count, "All workouts cleared");
        Ok(Notice::info(format!("Cleared {} workouts.", count)))
    }

    /// HTML list of all workouts in current order.
    pub fn render_list(&self) -> Result<String> {
        self.renderer.list(self.ledger.list())
    }

    /// Apply `change` to the ledger, then redraw markers and persist.
    /// On any error the previous ledger and markers are put back.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let previous_ledger = self.ledger.clone();
        let previous_map = self.map.clone();

        let result = change(&mut self.ledger).and_then(|value| {
            self.refresh_markers()?;
            self.persist()?;
            Ok(value)
        });

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Rolling back workout change");
            self.ledger = previous_ledger;
            self.map = previous_map;
        }
        result
    }

    fn refresh_markers(&mut self) -> Result<()> {
        self.map.clear_markers();
        for workout in self.ledger.list() {
            let popup = self.renderer.popup(workout)?;
            self.map.place_marker(workout.id(), workout.coords(), popup);
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.ledger.persist(&self.store)
    }
}
