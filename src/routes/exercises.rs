// SPDX-License-Identifier: MIT

//! Workout-scoped exercise routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::middleware::authorize::guard;
use crate::middleware::AuthorizationPolicy;
use crate::models::{Exercise, ExercisePatch, Intensity};
use crate::routes::{success, ApiResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
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
        .route("/", post(create_exercise).get(get_exercises))
        .route(
            "/{id}",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::any_role())))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExerciseRequest {
    #[serde(default)]
    pub workout_id: Option<String>,
    #[validate(length(min = 1, message = "Exercise name cannot be empty"))]
    pub name: String,
    pub equipment: Vec<String>,
    pub muscles_worked: Vec<String>,
    pub intensity: Intensity,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
}

/// Create an exercise owned by the authenticated user.
async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Exercise>>)> {
    payload.validate()?;

    let exercise = Exercise {
        id: None,
        workout_id: payload.workout_id,
        user_id: auth.uid.clone(),
        name: payload.name,
        equipment: payload.equipment,
        muscles_worked: payload.muscles_worked,
        intensity: payload.intensity,
        sets: payload.sets,
        reps: payload.reps,
    };

    let created = state.exercises.create_exercise(exercise).await?;
    Ok((StatusCode::CREATED, success(created, "Exercise Created")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExercisesQuery {
    workout_id: Option<String>,
}

/// Retrieve exercises: trainers see all, others only their own.
async fn get_exercises(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ExercisesQuery>,
) -> Result<Json<ApiResponse<Vec<Exercise>>>> {
    let exercises = state
        .exercises
        .get_exercises(&auth, query.workout_id.as_deref())
        .await?;
    Ok(success(exercises, "Exercises Retrieved"))
}

async fn get_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Exercise>>> {
    let exercise = state.exercises.get_exercise_by_id(&id).await?;
    Ok(success(
        exercise,
        format!("Exercise with ID \"{}\" retrieved successfully", id),
    ))
}

async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ExercisePatch>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    patch.validate()?;

    let updated = state.exercises.update_exercise(&id, &patch).await?;
    Ok(success(updated, "Exercise Updated"))
}

async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.exercises.delete_exercise(&id).await?;
    Ok(success((), "Exercise Deleted"))
}
