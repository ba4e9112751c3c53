// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map widget boundary and the in-process marker layer.

use crate::models::Coords;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Default zoom used when centering on a workout.
pub const DEFAULT_ZOOM: u8 = 13;

/// Operations the tracker needs from a map widget.
pub trait MapView {
    fn place_marker(&mut self, id: &str, coords: Coords, popup: String);

    /// Returns false if no marker with this id was placed.
    fn remove_marker(&mut self, id: &str) -> bool;

    fn center_on(&mut self, coords: Coords);

    fn clear_markers(&mut self);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: Coords,
    pub popup: String,
}

/// Marker state a frontend renders onto real map tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerLayer {
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number] | null"))]
    pub center: Option<Coords>,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn new(zoom: u8) -> Self {
        Self {
            center: None,
            zoom,
            markers: Vec::new(),
        }
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

impl MapView for MarkerLayer {
    fn place_marker(&mut self, id: &str, coords: Coords, popup: String) {
        self.markers.push(Marker {
            id: id.to_string(),
            coords,
            popup,
        });
    }

    fn remove_marker(&mut self, id: &str) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        self.markers.len() != before
    }

    fn center_on(&mut self, coords: Coords) {
        self.center = Some(coords);
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }
}
