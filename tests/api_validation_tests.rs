// SPDX-License-Identifier: MIT

//! Request validation tests.
//!
//! Malformed or incomplete bodies must be rejected with 400 and the
//! uniform error envelope before any database call is attempted, which
//! is why these run against the offline mock database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitforge::models::Role;
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::{create_test_app, test_token};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn signup_rejects_invalid_email() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "new-user", None);

    let payload = serde_json::json!({
        "name": "Test User",
        "email": "not-an-email",
        "role": "Lite",
        "healthMetrics": {"weight": 80.0, "height": 180.0},
        "workoutPreferences": {
            "daysAvailable": ["Monday"],
            "timePerDay": 60,
            "gymAccess": true
        },
        "background": {
            "experience": "beginner",
            "routine": "none",
            "goals": "strength"
        }
    });

    let response = app
        .oneshot(post("/api/v1/users", &token, &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn signup_rejects_empty_name() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "new-user", None);

    let payload = serde_json::json!({
        "name": "",
        "email": "test@example.com",
        "role": "Lite",
        "healthMetrics": {"weight": 80.0, "height": 180.0},
        "workoutPreferences": {
            "daysAvailable": ["Monday"],
            "timePerDay": 60,
            "gymAccess": true
        },
        "background": {
            "experience": "beginner",
            "routine": "none",
            "goals": "strength"
        }
    });

    let response = app
        .oneshot(post("/api/v1/users", &token, &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn workout_creation_rejects_empty_name() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "user-a", Some(Role::Premium));

    let payload = serde_json::json!({
        "workoutData": {"name": ""},
        "exerciseLibraryIds": ["lib-1"]
    });

    let response = app
        .oneshot(post("/api/v1/workouts", &token, &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn question_submission_rejects_empty_question() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "user-a", Some(Role::Premium));

    let response = app
        .oneshot(post("/api/v1/questions", &token, r#"{"question":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn library_entry_rejects_empty_name() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "trainer-1", Some(Role::Trainer));

    let payload = serde_json::json!({
        "name": "",
        "equipment": [],
        "musclesWorked": [],
        "intensity": "Low"
    });

    let response = app
        .oneshot(post(
            "/api/v1/exercise-library",
            &token,
            &payload.to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_role_string_is_rejected_at_deserialization() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "admin-1", Some(Role::Admin));

    let response = app
        .oneshot(post(
            "/api/v1/admin/claims",
            &token,
            r#"{"uid":"user-a","role":"SuperAdmin"}"#,
        ))
        .await
        .unwrap();

    // serde rejects the unknown variant before the handler runs
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn exercise_creation_rejects_empty_name() {
    let (app, state) = create_test_app();
    let token = test_token(&state, "user-a", Some(Role::Lite));

    let payload = serde_json::json!({
        "name": "",
        "equipment": [],
        "musclesWorked": [],
        "intensity": "Medium"
    });

    let response = app
        .oneshot(post("/api/v1/exercises", &token, &payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
