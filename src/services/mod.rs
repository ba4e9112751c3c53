// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod any_backend;
pub mod entity_store;
pub mod geolocation;
pub mod ledger;
pub mod local_backend;
pub mod map;
pub mod remote_backend;
pub mod render;
pub mod tracker;

pub use any_backend::AnyBackend;
pub use entity_store::{Entity, EntityBackend, EntityStore};
pub use geolocation::{ConfiguredPosition, Geolocator};
pub use ledger::{Ledger, SortCriterion};
pub use local_backend::LocalBackend;
pub use map::{MapView, MarkerLayer};
pub use remote_backend::RemoteBackend;
pub use render::WorkoutRenderer;
pub use tracker::Tracker;
