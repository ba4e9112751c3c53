// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML fragments for the workout list and map popups.
//!
//! Templates live under `templates/` and are compiled once per renderer.
//! Their names end in `.html`, so minijinja escapes every interpolated value.

use crate::error::Result;
use crate::models::{Workout, WorkoutKind, WorkoutView};
use minijinja::{context, Environment};
use serde::Serialize;

const POPUP: &str = include_str!("../../templates/popup.html");
const ITEM: &str = include_str!("../../templates/workout_item.html");
const LIST: &str = include_str!("../../templates/workout_list.html");

/// A workout plus the display values its list entry needs.
#[derive(Serialize)]
struct ItemContext {
    #[serde(flatten)]
    view: WorkoutView,
    icon: &'static str,
    /// Pace or speed, one decimal place
    metric: String,
    metric_unit: &'static str,
    extra_icon: &'static str,
    extra_value: f64,
    extra_unit: &'static str,
}

impl From<&Workout> for ItemContext {
    fn from(workout: &Workout) -> Self {
        let metric = workout.metric();
        let (extra_icon, extra_value, extra_unit) = match workout.kind() {
            WorkoutKind::Running { cadence } => ("🦶🏼", cadence, "spm"),
            WorkoutKind::Cycling { elevation_gain } => ("⛰", elevation_gain, "m"),
        };
        Self {
            view: WorkoutView::from(workout),
            icon: workout.workout_type().icon(),
            metric: format!("{:.1}", metric.value()),
            metric_unit: metric.unit(),
            extra_icon,
            extra_value,
            extra_unit,
        }
    }
}

/// Compiled workout templates.
pub struct WorkoutRenderer {
    env: Environment<'static>,
}

impl WorkoutRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("popup.html", POPUP)?;
        env.add_template("workout_item.html", ITEM)?;
        env.add_template("workout_list.html", LIST)?;
        Ok(Self { env })
    }

    /// Popup label shown on a workout's map marker.
    pub fn popup(&self, workout: &Workout) -> Result<String> {
        self.render(
            "popup.html",
            context! { workout => ItemContext::from(workout) },
        )
    }

    /// One `<li>` entry of the workout list, with edit/delete actions.
    pub fn item(&self, workout: &Workout) -> Result<String> {
        self.render(
            "workout_item.html",
            context! { workout => ItemContext::from(workout) },
        )
    }

    /// The whole list, in ledger order.
    pub fn list(&self, workouts: &[Workout]) -> Result<String> {
        let items: Vec<ItemContext> = workouts.iter().map(ItemContext::from).collect();
        self.render("workout_list.html", context! { workouts => items })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}
