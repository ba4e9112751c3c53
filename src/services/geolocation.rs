// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geolocation boundary.

use crate::error::{AppError, Result};
use crate::models::Coords;

/// Source of the user's current position.
pub trait Geolocator {
    fn current_position(&self) -> Result<Coords>;
}

/// Position taken from configuration (`HOME_LAT`/`HOME_LNG`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredPosition {
    coords: Option<Coords>,
}

impl ConfiguredPosition {
    pub fn new(coords: Option<Coords>) -> Self {
        Self { coords }
    }
}

impl Geolocator for ConfiguredPosition {
    fn current_position(&self) -> Result<Coords> {
        self.coords.ok_or_else(|| {
            AppError::NotFound(
                "GPS location not available. Could not get your position.".to_string(),
            )
        })
    }
}
