// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod notice;
pub mod product;
pub mod workout;

pub use notice::{Notice, NoticeKind};
pub use product::{Product, ProductRecord};
pub use workout::{
    Coords, Metric, NewWorkout, Workout, WorkoutEdit, WorkoutKind, WorkoutRecord, WorkoutType,
    WorkoutView,
};
