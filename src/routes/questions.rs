// SPDX-License-Identifier: MIT

//! Q&A routes. Premium members ask, trainers answer.

use crate::error::Result;
use crate::middleware::authorize::guard;
use crate::middleware::auth::AuthUser;
use crate::middleware::AuthorizationPolicy;
use crate::models::{Question, Role};
use crate::routes::{success, ApiResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    let ask = Router::new()
        .route("/", post(create_question))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::roles([
            Role::Premium,
            Role::Trainer,
            Role::Admin,
        ]))));

    let read = Router::new()
        .route("/", get(get_questions))
        .route("/{id}", get(get_question))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::any_role())));

    let answer = Router::new()
        .route("/{id}", put(respond_to_question))
        .route_layer(middleware::from_fn(guard(AuthorizationPolicy::roles([
            Role::Trainer,
        ]))));

    ask.merge(read).merge(answer)
}

#[derive(Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, message = "Question cannot be empty"))]
    pub question: String,
}

async fn create_question(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Question>>)> {
    payload.validate()?;

    let created = state
        .questions
        .create_question(&payload.question, &auth.uid)
        .await?;
    Ok((StatusCode::CREATED, success(created, "Question Created")))
}

async fn get_questions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Question>>>> {
    let questions = state.questions.get_questions(&auth).await?;
    Ok(success(questions, "Questions Retrieved"))
}

async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Question>>> {
    let question = state.questions.get_question_by_id(&id).await?;
    Ok(success(
        question,
        format!("Question with ID \"{}\" retrieved successfully", id),
    ))
}

#[derive(Deserialize, Validate)]
pub struct RespondToQuestionRequest {
    #[validate(length(min = 1, message = "Response cannot be empty"))]
    pub response: String,
}

async fn respond_to_question(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<RespondToQuestionRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    payload.validate()?;

    let updated = state
        .questions
        .respond_to_question(&id, &payload.response, &auth.uid)
        .await?;
    Ok(success(updated, "Question Updated"))
}
