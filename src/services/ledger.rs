// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout ledger: the ordered collection of logged workouts.
//!
//! All mutation goes through the ledger so that validation runs before any
//! change. Derived metrics are computed on access by [`Workout`], so an edit
//! can never leave them stale.

use crate::db::{collections, KeyValueStore};
use crate::error::{AppError, Result};
use crate::models::{NewWorkout, Workout, WorkoutEdit, WorkoutKind, WorkoutRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordering applied by [`Ledger::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortCriterion {
    DistanceAsc,
    DistanceDesc,
    DurationDesc,
    /// Newest first
    #[default]
    DateDesc,
}

impl SortCriterion {
    /// Parse a criterion name; anything unrecognized means newest first.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "distance-asc" => SortCriterion::DistanceAsc,
            "distance-desc" => SortCriterion::DistanceDesc,
            "duration-desc" => SortCriterion::DurationDesc,
            _ => SortCriterion::DateDesc,
        }
    }
}

/// Check numeric inputs, collecting every offending field.
///
/// Distance, duration and cadence must be finite and positive. Elevation
/// gain only has to be finite: descending rides are allowed.
pub fn validate(distance: f64, duration: f64, kind: &WorkoutKind) -> Result<()> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    let mut invalid = Vec::new();

    if !positive(distance) {
        invalid.push("distance");
    }
    if !positive(duration) {
        invalid.push("duration");
    }
    match *kind {
        WorkoutKind::Running { cadence } => {
            if !positive(cadence) {
                invalid.push("cadence");
            }
        }
        WorkoutKind::Cycling { elevation_gain } => {
            if !elevation_gain.is_finite() {
                invalid.push("elevationGain");
            }
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(invalid))
    }
}

/// In-memory ordered workout collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    workouts: Vec<Workout>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a workout dated now.
    pub fn add(&mut self, input: NewWorkout) -> Result<&Workout> {
        self.add_at(input, Utc::now())
    }

    /// Validate and append a workout with an explicit creation date.
    pub fn add_at(&mut self, input: NewWorkout, date: DateTime<Utc>) -> Result<&Workout> {
        validate(input.distance, input.duration, &input.kind)?;

        let workout = Workout::new(Uuid::new_v4().to_string(), date, input);
        tracing::debug!(
            id = workout.id(),
            workout_type = %workout.workout_type(),
            "Adding workout"
        );
        self.workouts.push(workout);
        Ok(&self.workouts[self.workouts.len() - 1])
    }

    /// Overwrite distance, duration and the variant field of a workout.
    ///
    /// The workout type itself cannot change.
    pub fn edit(&mut self, id: &str, edit: WorkoutEdit) -> Result<&Workout> {
        let index = self.position(id)?;
        let workout = &mut self.workouts[index];

        let existing = workout.workout_type();
        let requested = edit.kind.workout_type();
        if existing != requested {
            return Err(AppError::TypeMismatch {
                existing,
                requested,
            });
        }
        validate(edit.distance, edit.duration, &edit.kind)?;

        workout.apply(edit);
        tracing::debug!(id, "Edited workout");
        Ok(&self.workouts[index])
    }

    /// Remove a workout, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id() == id)?;
        Some(self.workouts.remove(index))
    }

    /// Stable in-place reorder of the whole collection.
    pub fn sort(&mut self, criterion: SortCriterion) {
        match criterion {
            SortCriterion::DistanceAsc => self
                .workouts
                .sort_by(|a, b| a.distance().total_cmp(&b.distance())),
            SortCriterion::DistanceDesc => self
                .workouts
                .sort_by(|a, b| b.distance().total_cmp(&a.distance())),
            SortCriterion::DurationDesc => self
                .workouts
                .sort_by(|a, b| b.duration().total_cmp(&a.duration())),
            SortCriterion::DateDesc => self.workouts.sort_by(|a, b| b.date().cmp(&a.date())),
        }
    }

    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Record a selection of the workout in the list.
    pub fn select(&mut self, id: &str) -> Result<&Workout> {
        let index = self.position(id)?;
        self.workouts[index].click();
        Ok(&self.workouts[index])
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Write the full collection under the `workouts` key.
    pub fn persist(&self, store: &impl KeyValueStore) -> Result<()> {
        let records: Vec<WorkoutRecord> = self.workouts.iter().map(WorkoutRecord::from).collect();
        let data = serde_json::to_string(&records)?;
        store.set(collections::WORKOUTS, &data)?;
        tracing::debug!(count = records.len(), "Persisted workouts");
        Ok(())
    }

    /// Rebuild a ledger from the `workouts` key.
    ///
    /// Stored derived values are ignored. Records that no longer parse or
    /// validate are dropped with a warning; the rest are kept.
    pub fn restore(store: &impl KeyValueStore) -> Result<Self> {
        let Some(data) = store.get(collections::WORKOUTS)? else {
            return Ok(Self::new());
        };
        let entries: Vec<serde_json::Value> = serde_json::from_str(&data)?;
        let total = entries.len();

        let workouts: Vec<Workout> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let record = match serde_json::from_value::<WorkoutRecord>(entry) {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Dropping unreadable stored workout");
                        return None;
                    }
                };
                match validate(record.distance, record.duration, &record.kind) {
                    Ok(()) => Some(Workout::from(record)),
                    Err(e) => {
                        tracing::warn!(id = %record.id, error = %e, "Dropping corrupt stored workout");
                        None
                    }
                }
            })
            .collect();

        tracing::info!(restored = workouts.len(), stored = total, "Restored workouts");
        Ok(Self { workouts })
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
    }
}
