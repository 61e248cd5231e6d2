// SPDX-License-Identifier: MIT

//! Admin-only routes for managing user role claims.

use crate::error::Result;
use crate::middleware::authorize::guard;
use crate::middleware::AuthorizationPolicy;
use crate::models::Role;
use crate::routes::{success, ApiResponse};
use crate::AppState;
use axum::{extract::State, middleware, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/claims", post(set_claims))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::roles([
            Role::Admin,
        ]))))
}

#[derive(Deserialize, Validate)]
pub struct SetClaimsRequest {
    #[validate(length(min = 1, message = "User id cannot be empty"))]
    pub uid: String,
    pub role: Role,
}

async fn set_claims(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetClaimsRequest>,
) -> Result<Json<ApiResponse<()>>> {
    payload.validate()?;

    state.users.set_role(&payload.uid, payload.role).await?;
    Ok(success(
        (),
        format!("Custom claims set for user: {}", payload.uid),
    ))
}
