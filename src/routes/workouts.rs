// SPDX-License-Identifier: MIT

//! Workout routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::middleware::authorize::guard;
use crate::middleware::AuthorizationPolicy;
use crate::models::{NewWorkout, Workout, WorkoutPatch};
use crate::routes::{success, ApiResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_workout).get(get_workouts))
        .route(
            "/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::any_role())))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    #[validate(nested)]
    pub workout_data: NewWorkout,
    #[serde(default)]
    pub exercise_library_ids: Vec<String>,
}

/// Assemble a new workout from library-exercise references.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Workout>>)> {
    payload.validate()?;

    let workout = state
        .workouts
        .create_workout(payload.workout_data, &auth.uid, &payload.exercise_library_ids)
        .await?;

    Ok((StatusCode::CREATED, success(workout, "Workout Created")))
}

/// Retrieve all workouts owned by the authenticated user.
async fn get_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Workout>>>> {
    let workouts = state.workouts.get_workouts_by_user(&auth.uid).await?;
    Ok(success(workouts, "Workouts Retrieved"))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Workout>>> {
    let workout = state.workouts.get_workout_by_id(&id).await?;
    Ok(success(
        workout,
        format!("Workout with ID \"{}\" retrieved successfully", id),
    ))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<WorkoutPatch>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    patch.validate()?;

    let updated = state.workouts.update_workout(&id, &patch).await?;
    Ok(success(updated, "Workout Updated"))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.workouts.delete_workout(&id).await?;
    Ok(success((), "Workout Deleted"))
}
