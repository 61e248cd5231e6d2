// SPDX-License-Identifier: MIT

//! Trainer question service.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{Question, Role};
use axum::http::StatusCode;
use serde_json::json;

#[derive(Clone)]
pub struct QuestionService {
    db: FirestoreDb,
}

impl QuestionService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Submit a new question. `dateAsked` is stamped here, never taken
    /// from the client.
    pub async fn create_question(
        &self,
        question_text: &str,
        user_id: &str,
    ) -> Result<Question, AppError> {
        if user_id.is_empty() {
            return Err(AppError::service_with_status(
                "Failed to create question: User ID is required to submit a question",
                "VALIDATION_ERROR",
                StatusCode::BAD_REQUEST,
            ));
        }

        let mut question = Question {
            id: None,
            user_id: user_id.to_string(),
            trainer_id: None,
            question: question_text.to_string(),
            response: None,
            date_asked: chrono::Utc::now().to_rfc3339(),
            date_responded: None,
        };

        let id = self
            .db
            .create_document(collections::QUESTIONS, &question, None)
            .await
            .map_err(|e| AppError::wrap_service("Failed to create question", e))?;

        question.id = Some(id);
        Ok(question)
    }

    /// Retrieve questions visible to the requester: trainers see all,
    /// everyone else only their own.
    pub async fn get_questions(&self, viewer: &AuthUser) -> Result<Vec<Question>, AppError> {
        let mut questions: Vec<Question> = self
            .db
            .get_documents(collections::QUESTIONS)
            .await
            .map_err(|e| AppError::wrap_service("Failed to retrieve questions", e))?;

        if viewer.role != Some(Role::Trainer) {
            questions.retain(|question| question.user_id == viewer.uid);
        }

        Ok(questions)
    }

    pub async fn get_question_by_id(&self, id: &str) -> Result<Question, AppError> {
        let mut question: Question = self
            .db
            .get_document_by_id(collections::QUESTIONS, id)
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to retrieve question {}", id), e)
            })?;

        question.id = Some(id.to_string());
        Ok(question)
    }

    /// Record a trainer's response, moving the question from Open to
    /// Answered. Re-answering is rejected: Answered is a terminal state.
    pub async fn respond_to_question(
        &self,
        id: &str,
        response_text: &str,
        trainer_id: &str,
    ) -> Result<serde_json::Value, AppError> {
        let context = || format!("Failed to respond to question {}", id);

        if trainer_id.is_empty() {
            return Err(AppError::service_with_status(
                format!("{}: Trainer ID is required to respond to a question", context()),
                "VALIDATION_ERROR",
                StatusCode::BAD_REQUEST,
            ));
        }

        let existing = self
            .get_question_by_id(id)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))?;

        if existing.is_answered() {
            return Err(AppError::service_with_status(
                format!("{}: Question has already been answered", context()),
                "QUESTION_ALREADY_ANSWERED",
                StatusCode::CONFLICT,
            ));
        }

        let updated = json!({
            "trainerId": trainer_id,
            "response": response_text,
            "dateResponded": chrono::Utc::now().to_rfc3339(),
        });

        self.db
            .update_document(collections::QUESTIONS, id, &updated)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))?;

        let mut value = updated;
        value["id"] = json!(id);
        Ok(value)
    }
}
