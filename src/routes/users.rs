// SPDX-License-Identifier: MIT

//! User profile routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::middleware::authorize::guard;
use crate::middleware::AuthorizationPolicy;
use crate::models::user::{Background, HealthMetrics, WorkoutPreferences};
use crate::models::{Role, User, UserPatch};
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
    // Signup carries no role guard: any authenticated subject may create
    // their own profile.
    let signup = Router::new().route("/", post(create_user));

    let own_or_admin = Router::new()
        .route(
            "/{uid}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn(guard(
            AuthorizationPolicy::roles([Role::Admin]).allow_same_user(),
        )));

    let admin_only = Router::new()
        .route("/{uid}/upgrade", post(upgrade_user))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::roles([
            Role::Admin,
        ]))));

    signup.merge(own_or_admin).merge(admin_only)
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    pub role: Role,
    pub health_metrics: HealthMetrics,
    pub workout_preferences: WorkoutPreferences,
    pub background: Background,
}

/// Create the authenticated user's profile, keyed by their subject id.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>)> {
    payload.validate()?;

    let user = User {
        id: None,
        name: payload.name,
        email: payload.email,
        role: payload.role,
        health_metrics: payload.health_metrics,
        workout_preferences: payload.workout_preferences,
        background: payload.background,
    };

    let created = state.users.create_user(user, &auth.uid).await?;
    Ok((StatusCode::CREATED, success(created, "User Created")))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let user = state.users.get_user_by_id(&uid).await?;
    Ok(success(
        user,
        format!("User with ID \"{}\" retrieved successfully", uid),
    ))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    patch.validate()?;

    let updated = state.users.update_user(&uid, &patch).await?;
    Ok(success(updated, "User Updated"))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.users.delete_user(&uid).await?;
    Ok(success((), "User Deleted"))
}

/// Upgrade a user to the Premium tier (admin operation).
async fn upgrade_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.users.set_role(&uid, Role::Premium).await?;
    Ok(success((), format!("User {} upgraded to Premium", uid)))
}
