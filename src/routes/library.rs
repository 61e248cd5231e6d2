// SPDX-License-Identifier: MIT

//! Exercise library routes. Reads are open to any role; curation is
//! trainer-only.

use crate::error::Result;
use crate::middleware::authorize::guard;
use crate::middleware::AuthorizationPolicy;
use crate::models::{Intensity, LibraryEntry, LibraryEntryPatch, Role};
use crate::routes::{success, ApiResponse};
use crate::services::library::LibraryFilter;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    let read = Router::new()
        .route("/", get(get_entries))
        .route("/{id}", get(get_entry))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::any_role())));

    let curate = Router::new()
        .route("/", post(create_entry))
        .route("/{id}", put(update_entry).delete(delete_entry))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::roles([
            Role::Trainer,
        ]))));

    read.merge(curate)
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLibraryEntryRequest {
    #[validate(length(min = 1, message = "Exercise name cannot be empty"))]
    pub name: String,
    pub equipment: Vec<String>,
    pub muscles_worked: Vec<String>,
    pub intensity: Intensity,
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLibraryEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LibraryEntry>>)> {
    payload.validate()?;

    let entry = LibraryEntry {
        id: None,
        name: payload.name,
        equipment: payload.equipment,
        muscles_worked: payload.muscles_worked,
        intensity: payload.intensity,
    };

    let created = state.library.create_entry(entry).await?;
    Ok((StatusCode::CREATED, success(created, "Exercise Created")))
}

/// Comma-separated list filters, e.g. `?equipment=Barbell,Bench`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibraryQuery {
    equipment: Option<String>,
    muscles_worked: Option<String>,
    intensity: Option<Intensity>,
}

fn split_list(value: Option<String>) -> Option<Vec<String>> {
    value.map(|v| {
        v.split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    })
}

async fn get_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<ApiResponse<Vec<LibraryEntry>>>> {
    let filter = LibraryFilter {
        equipment: split_list(query.equipment),
        muscles_worked: split_list(query.muscles_worked),
        intensity: query.intensity,
    };

    let entries = state.library.get_entries(&filter).await?;
    Ok(success(entries, "Exercises Retrieved"))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LibraryEntry>>> {
    let entry = state.library.get_entry_by_id(&id).await?;
    Ok(success(
        entry,
        format!("Exercise with ID \"{}\" retrieved successfully", id),
    ))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<LibraryEntryPatch>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    patch.validate()?;

    let updated = state.library.update_entry(&id, &patch).await?;
    Ok(success(updated, "Exercise Updated"))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.library.delete_entry(&id).await?;
    Ok(success((), "Exercise Deleted"))
}
