// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: a running or cycling session logged at a map position.
//!
//! Derived values (pace, speed, description) are computed from the current
//! fields on every access, so they can never go stale after an edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time_utils::{format_month_day, format_utc_rfc3339};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

/// Workout discriminant without the variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Marker glyph used in list items and popups.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific payload, tagged by `type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute
        cadence: f64,
    },
    Cycling {
        /// Meters climbed; zero or negative is allowed
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
    },
}

impl WorkoutKind {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// The derived performance figure of a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Minutes per kilometer
    Pace(f64),
    /// Kilometers per hour
    Speed(f64),
}

impl Metric {
    pub fn value(&self) -> f64 {
        match self {
            Metric::Pace(v) | Metric::Speed(v) => *v,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Pace(_) => "min/km",
            Metric::Speed(_) => "km/h",
        }
    }
}

/// Input for a new workout, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NewWorkout {
    pub coords: Coords,
    /// Distance in km
    pub distance: f64,
    /// Duration in minutes
    pub duration: f64,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

/// Replacement values for an existing workout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WorkoutEdit {
    pub distance: f64,
    pub duration: f64,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

/// A logged workout owned by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    date: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    kind: WorkoutKind,
    clicks: u32,
}

impl Workout {
    pub(crate) fn new(id: String, date: DateTime<Utc>, input: NewWorkout) -> Self {
        Self {
            id,
            date,
            coords: input.coords,
            distance: input.distance,
            duration: input.duration,
            kind: input.kind,
            clicks: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Pace for running, speed for cycling.
    pub fn metric(&self) -> Metric {
        match self.kind {
            WorkoutKind::Running { .. } => Metric::Pace(self.duration / self.distance),
            WorkoutKind::Cycling { .. } => Metric::Speed(self.distance / (self.duration / 60.0)),
        }
    }

    /// e.g. "Running on October 15"
    pub fn description(&self) -> String {
        let label = match self.kind {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        };
        format!("{} on {}", label, format_month_day(self.date))
    }

    pub(crate) fn apply(&mut self, edit: WorkoutEdit) {
        self.distance = edit.distance;
        self.duration = edit.duration;
        self.kind = edit.kind;
    }

    pub(crate) fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// Stored form of a workout under the `workouts` key.
///
/// Derived fields are written for readers of the raw storage but are
/// ignored when the record is turned back into a [`Workout`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    #[serde(flatten)]
    pub kind: WorkoutKind,
    #[serde(default)]
    pub clicks: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let (pace, speed) = match workout.metric() {
            Metric::Pace(p) => (Some(p), None),
            Metric::Speed(s) => (None, Some(s)),
        };
        Self {
            id: workout.id.clone(),
            date: workout.date,
            coords: workout.coords,
            distance: workout.distance,
            duration: workout.duration,
            kind: workout.kind,
            clicks: workout.clicks,
            description: Some(workout.description()),
            pace,
            speed,
        }
    }
}

impl From<WorkoutRecord> for Workout {
    fn from(record: WorkoutRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            coords: record.coords,
            distance: record.distance,
            duration: record.duration,
            kind: record.kind,
            clicks: record.clicks,
        }
    }
}

/// Workout as returned by the API, with derived values filled in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutView {
    pub id: String,
    /// RFC3339 creation time
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: Coords,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub r#type: WorkoutType,
    pub distance: f64,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    pub description: String,
    pub clicks: u32,
}

impl From<&Workout> for WorkoutView {
    fn from(workout: &Workout) -> Self {
        let (cadence, elevation_gain) = match workout.kind {
            WorkoutKind::Running { cadence } => (Some(cadence), None),
            WorkoutKind::Cycling { elevation_gain } => (None, Some(elevation_gain)),
        };
        let (pace, speed) = match workout.metric() {
            Metric::Pace(p) => (Some(p), None),
            Metric::Speed(s) => (None, Some(s)),
        };
        Self {
            id: workout.id.clone(),
            date: format_utc_rfc3339(workout.date),
            coords: workout.coords,
            r#type: workout.workout_type(),
            distance: workout.distance,
            duration: workout.duration,
            cadence,
            elevation_gain,
            pace,
            speed,
            description: workout.description(),
            clicks: workout.clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn running() -> Workout {
        Workout::new(
            "w1".to_string(),
            Utc.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap(),
            NewWorkout {
                coords: Coords::new(10.0, 10.0),
                distance: 5.0,
                duration: 25.0,
                kind: WorkoutKind::Running { cadence: 150.0 },
            },
        )
    }

    #[test]
    fn test_description_uses_month_and_day() {
        assert_eq!(running().description(), "Running on March 7");
    }

    #[test]
    fn test_metric_follows_edits() {
        let mut workout = running();
        assert_eq!(workout.metric(), Metric::Pace(5.0));

        workout.apply(WorkoutEdit {
            distance: 10.0,
            duration: 40.0,
            kind: WorkoutKind::Running { cadence: 160.0 },
        });
        assert_eq!(workout.metric(), Metric::Pace(4.0));
    }

    #[test]
    fn test_record_wire_format() {
        let record = WorkoutRecord::from(&running());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["type"], "running");
        assert_eq!(json["coords"], serde_json::json!([10.0, 10.0]));
        assert_eq!(json["cadence"], 150.0);
        assert_eq!(json["pace"], 5.0);
        assert!(json.get("speed").is_none());
    }

    #[test]
    fn test_cycling_record_uses_camel_case_elevation() {
        let json = serde_json::json!({
            "id": "1700000000",
            "date": "2024-05-01T08:30:00.000Z",
            "coords": [1.5, 2.5],
            "distance": 20.0,
            "duration": 60.0,
            "type": "cycling",
            "elevationGain": -5.0,
            "clicks": 2,
            "speed": 999.0
        });

        let record: WorkoutRecord = serde_json::from_value(json).unwrap();
        let workout = Workout::from(record);

        assert_eq!(
            workout.kind(),
            WorkoutKind::Cycling {
                elevation_gain: -5.0
            }
        );
        assert_eq!(workout.metric(), Metric::Speed(20.0));
        assert_eq!(workout.clicks(), 2);
    }
}
