// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout tracker: log runs and rides at map positions.
//!
//! This crate provides the workout ledger, a generic insert-or-update
//! entity store, and the HTTP API a map frontend drives.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use models::Product;
use services::{AnyBackend, EntityStore, Tracker};
use tokio::sync::Mutex;

/// Product store as wired into the server.
pub type ProductStore = EntityStore<Product, AnyBackend>;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<Tracker>,
    pub products: ProductStore,
}
