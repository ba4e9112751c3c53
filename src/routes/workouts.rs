// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes: the actions of the tracker sidebar and map.

use crate::error::{AppError, Result};
use crate::models::{Coords, NewWorkout, Notice, WorkoutEdit, WorkoutKind, WorkoutView};
use crate::services::map::MarkerLayer;
use crate::services::SortCriterion;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts)
                .post(create_workout)
                .delete(reset_workouts),
        )
        .route("/api/workouts/sort", post(sort_workouts))
        .route(
            "/api/workouts/{id}",
            get(get_workout)
                .put(update_workout)
                .delete(delete_workout),
        )
        .route("/api/workouts/{id}/select", post(select_workout))
        .route("/api/map", get(get_map))
        .route("/workouts", get(workouts_page))
}

// ─── Responses ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutResponse {
    pub workout: WorkoutView,
    pub notice: Notice,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    pub workouts: Vec<WorkoutView>,
    pub total: usize,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NoticeResponse {
    pub notice: Notice,
}

// ─── Listing ─────────────────────────────────────────────────

async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<WorkoutsResponse> {
    let tracker = state.tracker.lock().await;
    let workouts = tracker.views();
    Json(WorkoutsResponse {
        total: workouts.len(),
        workouts,
    })
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutView>> {
    let tracker = state.tracker.lock().await;
    tracker
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
}

/// Rendered sidebar list.
async fn workouts_page(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let tracker = state.tracker.lock().await;
    Ok(Html(tracker.render_list()?))
}

async fn get_map(State(state): State<Arc<AppState>>) -> Json<MarkerLayer> {
    let tracker = state.tracker.lock().await;
    Json(tracker.map().clone())
}

// ─── Create / Edit ───────────────────────────────────────────

/// Form submission for a new workout.
///
/// `coords` is the map position clicked before the form was shown.
#[derive(Deserialize)]
struct CreateWorkoutRequest {
    coords: Option<Coords>,
    distance: f64,
    duration: f64,
    #[serde(flatten)]
    kind: WorkoutKind,
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let coords = body.coords.ok_or_else(|| {
        AppError::BadRequest("Please click on the map to place your workout first!".to_string())
    })?;

    let input = NewWorkout {
        coords,
        distance: body.distance,
        duration: body.duration,
        kind: body.kind,
    };

    let mut tracker = state.tracker.lock().await;
    let (workout, notice) = tracker.add(input).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected new workout");
    })?;

    Ok((
        StatusCode::CREATED,
        Json(WorkoutResponse { workout, notice }),
    ))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(edit): Json<WorkoutEdit>,
) -> Result<Json<WorkoutResponse>> {
    let mut tracker = state.tracker.lock().await;
    let (workout, notice) = tracker.edit(&id, edit)?;
    Ok(Json(WorkoutResponse { workout, notice }))
}

// ─── Delete / Reset ──────────────────────────────────────────

/// Destructive actions must be confirmed explicitly.
#[derive(Deserialize)]
struct ConfirmQuery {
    #[serde(default)]
    confirm: bool,
}

fn require_confirmation(query: &ConfirmQuery) -> Result<()> {
    if !query.confirm {
        return Err(AppError::BadRequest(
            "This action cannot be undone; repeat it with ?confirm=true".to_string(),
        ));
    }
    Ok(())
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<NoticeResponse>> {
    require_confirmation(&query)?;
    let mut tracker = state.tracker.lock().await;
    let notice = tracker.delete(&id)?;
    Ok(Json(NoticeResponse { notice }))
}

async fn reset_workouts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<NoticeResponse>> {
    require_confirmation(&query)?;
    let mut tracker = state.tracker.lock().await;
    let notice = tracker.reset()?;
    Ok(Json(NoticeResponse { notice }))
}

// ─── Sort / Select ───────────────────────────────────────────

#[derive(Deserialize)]
struct SortRequest {
    /// `distance-asc`, `distance-desc`, `duration-desc` or `date-desc`
    #[serde(default)]
    criterion: String,
}

async fn sort_workouts(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SortRequest>,
) -> Result<Json<WorkoutsResponse>> {
    let criterion = SortCriterion::parse_or_default(&body.criterion);
    tracing::debug!(?criterion, "Sorting workouts");

    let mut tracker = state.tracker.lock().await;
    tracker.sort(criterion)?;
    let workouts = tracker.views();
    Ok(Json(WorkoutsResponse {
        total: workouts.len(),
        workouts,
    }))
}

/// Move the map to a workout picked from the list.
async fn select_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutView>> {
    let mut tracker = state.tracker.lock().await;
    Ok(Json(tracker.select(&id)?))
}
