// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API tests: form submission, edits, deletes, sorting and reset.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;
use workout_tracker::db::{collections, KeyValueStore};

mod common;

use common::{body_json, empty_request, json_request};

async fn create(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/workouts", body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn run_body(lat: f64, distance: f64, duration: f64) -> Value {
    json!({
        "coords": [lat, 10.0],
        "type": "running",
        "distance": distance,
        "duration": duration,
        "cadence": 150
    })
}

#[tokio::test]
async fn test_create_running_workout() {
    let (app, state, store) = common::create_test_app();

    let (status, body) = create(&app, run_body(10.0, 5.0, 25.0)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workout"]["type"], "running");
    assert_eq!(body["workout"]["pace"], 5.0);
    assert!(body["workout"].get("speed").is_none());
    assert_eq!(body["notice"]["kind"], "success");
    assert!(body["notice"]["message"]
        .as_str()
        .unwrap()
        .ends_with("successfully added!"));

    assert_eq!(state.tracker.lock().await.ledger().len(), 1);
    assert!(store.get(collections::WORKOUTS).unwrap().is_some());
}

#[tokio::test]
async fn test_create_cycling_workout_allows_negative_elevation() {
    let (app, _state, _store) = common::create_test_app();

    let (status, body) = create(
        &app,
        json!({
            "coords": [10, 10],
            "type": "cycling",
            "distance": 20,
            "duration": 60,
            "elevationGain": -5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workout"]["speed"], 20.0);
    assert_eq!(body["workout"]["elevationGain"], -5.0);
}

#[tokio::test]
async fn test_create_without_map_click_is_rejected() {
    let (app, state, _store) = common::create_test_app();

    let (status, body) = create(
        &app,
        json!({
            "type": "running",
            "distance": 5,
            "duration": 25,
            "cadence": 150
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["notice"]["kind"], "error");
    assert_eq!(
        body["notice"]["message"],
        "Please click on the map to place your workout first!"
    );
    assert!(state.tracker.lock().await.ledger().is_empty());
}

#[tokio::test]
async fn test_invalid_numbers_leave_collection_unchanged() {
    let (app, state, _store) = common::create_test_app();

    let (status, body) = create(&app, run_body(10.0, 0.0, 25.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_str().unwrap().contains("distance"));

    let (status, _) = create(&app, run_body(10.0, 5.0, -1.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(state.tracker.lock().await.ledger().is_empty());
}

#[tokio::test]
async fn test_list_and_get_workout() {
    let (app, _state, _store) = common::create_test_app();
    let (_, created) = create(&app, run_body(10.0, 5.0, 25.0)).await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["workouts"][0]["id"], id.as_str());

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/workouts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("GET", "/api/workouts/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_recomputes_metric() {
    let (app, _state, _store) = common::create_test_app();
    let (_, created) = create(&app, run_body(10.0, 5.0, 25.0)).await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/workouts/{}", id),
            json!({ "type": "running", "distance": 10, "duration": 40, "cadence": 160 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["workout"]["pace"], 4.0);
    assert_eq!(body["workout"]["cadence"], 160.0);
    assert!(body["notice"]["message"]
        .as_str()
        .unwrap()
        .ends_with("successfully updated!"));
}

#[tokio::test]
async fn test_edit_cannot_change_type() {
    let (app, state, _store) = common::create_test_app();
    let (_, created) = create(&app, run_body(10.0, 5.0, 25.0)).await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/workouts/{}", id),
            json!({ "type": "cycling", "distance": 20, "duration": 60, "elevationGain": 100 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "type_mismatch");

    let tracker = state.tracker.lock().await;
    let view = tracker.get(&id).unwrap();
    assert_eq!(view.distance, 5.0);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (app, state, _store) = common::create_test_app();
    let (_, created) = create(&app, run_body(10.0, 5.0, 25.0)).await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/workouts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.tracker.lock().await.ledger().len(), 1);

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/workouts/{}?confirm=true", id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["notice"]["message"]
        .as_str()
        .unwrap()
        .contains("was successfully deleted"));
    assert!(state.tracker.lock().await.ledger().is_empty());

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/workouts/{}?confirm=true", id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sort_by_distance() {
    let (app, _state, _store) = common::create_test_app();
    for distance in [5.0, 2.0, 8.0] {
        create(&app, run_body(10.0, distance, 30.0)).await;
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/workouts/sort",
            json!({ "criterion": "distance-asc" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let distances: Vec<f64> = body["workouts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["distance"].as_f64().unwrap())
        .collect();
    assert_eq!(distances, vec![2.0, 5.0, 8.0]);

    // Order survives into the plain listing
    let response = app
        .oneshot(empty_request("GET", "/api/workouts"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["workouts"][0]["distance"], 2.0);
}

#[tokio::test]
async fn test_unknown_sort_criterion_falls_back_to_date() {
    let (app, _state, _store) = common::create_test_app();
    create(&app, run_body(10.0, 5.0, 30.0)).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/workouts/sort",
            json!({ "criterion": "by-mood" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["total"], 1);
}

#[tokio::test]
async fn test_select_centers_map_and_counts_click() {
    let (app, _state, _store) = common::create_test_app();
    let (_, created) = create(&app, run_body(42.0, 5.0, 25.0)).await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(empty_request("POST", &format!("/api/workouts/{}/select", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["clicks"], 1);

    let response = app
        .oneshot(empty_request("GET", "/api/map"))
        .await
        .unwrap();
    let map = body_json(response).await;
    assert_eq!(map["center"], json!([42.0, 10.0]));
    assert_eq!(map["markers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let (app, state, store) = common::create_test_app();
    create(&app, run_body(10.0, 5.0, 25.0)).await;
    create(&app, run_body(11.0, 6.0, 25.0)).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(empty_request("DELETE", "/api/workouts?confirm=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["notice"]["kind"], "info");
    assert_eq!(body["notice"]["message"], "Cleared 2 workouts.");

    assert!(state.tracker.lock().await.ledger().is_empty());
    assert!(store.get(collections::WORKOUTS).unwrap().is_none());
}

#[tokio::test]
async fn test_workouts_survive_reload() {
    let (app, _state, store) = common::create_test_app();
    create(&app, run_body(10.0, 5.0, 25.0)).await;

    let reloaded = common::test_state(store);
    let tracker = reloaded.tracker.lock().await;
    assert_eq!(tracker.ledger().len(), 1);
    assert_eq!(tracker.views()[0].pace, Some(5.0));
}

#[tokio::test]
async fn test_rendered_list_page() {
    let (app, _state, _store) = common::create_test_app();
    create(&app, run_body(10.0, 5.0, 25.0)).await;

    let response = app
        .oneshot(empty_request("GET", "/workouts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("workout--running"));
    assert!(html.contains("5.0"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let (app, _state, _store) = common::create_test_app();

    let response = app
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_storage_failure_is_reported_and_rolled_back() {
    let (app, state, store) = common::create_test_app();
    let (_, created) = create(&app, run_body(10.0, 5.0, 25.0)).await;
    let id = created["workout"]["id"].as_str().unwrap().to_string();
    store.set_fail_writes(true);

    let (status, body) = create(&app, run_body(11.0, 6.0, 25.0)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage_error");
    assert!(body.get("details").is_none());

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/workouts/{}?confirm=true", id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let tracker = state.tracker.lock().await;
    assert_eq!(tracker.ledger().len(), 1);
    assert_eq!(tracker.map().markers.len(), 1);
}

#[tokio::test]
async fn test_cors_allows_only_the_frontend_origin() {
    let (app, state, _store) = common::create_test_app();
    let frontend = state.config.frontend_url.clone();

    let with_origin = |origin: &str| {
        axum::http::Request::builder()
            .uri("/api/workouts")
            .header("origin", origin)
            .body(axum::body::Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(with_origin(&frontend)).await.unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        frontend.as_str()
    );

    let response = app
        .oneshot(with_origin("http://localhost:9999"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
