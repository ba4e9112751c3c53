// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_tracker::error::AppError;
use workout_tracker::models::WorkoutType;

#[test]
fn test_invalid_fields_only_for_validation() {
    let err = AppError::Validation(vec!["distance", "cadence"]);
    assert_eq!(err.invalid_fields(), ["distance", "cadence"]);
    assert_eq!(err.to_string(), "Invalid numeric input for: distance, cadence");

    let err = AppError::BadRequest("nope".to_string());
    assert!(err.invalid_fields().is_empty());
}

#[test]
fn test_type_mismatch_message() {
    let err = AppError::TypeMismatch {
        existing: WorkoutType::Running,
        requested: WorkoutType::Cycling,
    };
    assert_eq!(
        err.to_string(),
        "Cannot change workout type from running to cycling during edit"
    );
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::Validation(vec!["duration"]), StatusCode::BAD_REQUEST),
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
        (AppError::Insert("x".to_string()), StatusCode::CONFLICT),
        (AppError::Update("x".to_string()), StatusCode::CONFLICT),
        (AppError::SaveInFlight("x".to_string()), StatusCode::CONFLICT),
        (AppError::Storage("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn test_json_errors_become_storage_errors() {
    let parse_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
    let err: AppError = parse_err.into();
    assert!(matches!(err, AppError::Storage(_)));
}

async fn body_of(err: AppError) -> serde_json::Value {
    let response = err.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_error_body_carries_error_notice() {
    let body = body_of(AppError::NotFound("Workout w1 not found".to_string())).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["notice"]["kind"], "error");
    assert_eq!(body["notice"]["message"], "Workout w1 not found");
}

#[tokio::test]
async fn test_internal_errors_hide_details_from_notice() {
    let body = body_of(AppError::Storage("disk on fire".to_string())).await;
    assert!(body.get("details").is_none());
    assert_eq!(body["notice"]["kind"], "error");
    assert!(!body["notice"]["message"]
        .as_str()
        .unwrap()
        .contains("disk"));
}
