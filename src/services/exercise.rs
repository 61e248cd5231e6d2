// SPDX-License-Identifier: MIT

//! Workout-scoped exercise service.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{Exercise, ExercisePatch, Role};
use serde_json::json;

#[derive(Clone)]
pub struct ExerciseService {
    db: FirestoreDb,
}

impl ExerciseService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    pub async fn create_exercise(&self, mut exercise: Exercise) -> Result<Exercise, AppError> {
        exercise.id = None;
        let id = self
            .db
            .create_document(collections::EXERCISES, &exercise, None)
            .await
            .map_err(|e| AppError::wrap_service("Failed to create exercise", e))?;

        exercise.id = Some(id);
        Ok(exercise)
    }

    /// Retrieve exercises visible to the requester.
    ///
    /// Trainers see the whole collection; everyone else only their own.
    /// The optional workout filter applies on top of visibility.
    pub async fn get_exercises(
        &self,
        viewer: &AuthUser,
        workout_id: Option<&str>,
    ) -> Result<Vec<Exercise>, AppError> {
        let mut exercises: Vec<Exercise> = self
            .db
            .get_documents(collections::EXERCISES)
            .await
            .map_err(|e| AppError::wrap_service("Failed to retrieve exercises", e))?;

        if viewer.role != Some(Role::Trainer) {
            exercises.retain(|exercise| exercise.user_id == viewer.uid);
        }

        if let Some(workout_id) = workout_id {
            exercises.retain(|exercise| exercise.workout_id.as_deref() == Some(workout_id));
        }

        Ok(exercises)
    }

    pub async fn get_exercise_by_id(&self, id: &str) -> Result<Exercise, AppError> {
        let mut exercise: Exercise = self
            .db
            .get_document_by_id(collections::EXERCISES, id)
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to retrieve exercise {}", id), e)
            })?;

        exercise.id = Some(id.to_string());
        Ok(exercise)
    }

    pub async fn update_exercise(
        &self,
        id: &str,
        patch: &ExercisePatch,
    ) -> Result<serde_json::Value, AppError> {
        self.db
            .update_document(collections::EXERCISES, id, patch)
            .await
            .map_err(|e| AppError::wrap_service(&format!("Failed to update exercise {}", id), e))?;

        let mut value = serde_json::to_value(patch)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        value["id"] = json!(id);
        Ok(value)
    }

    pub async fn delete_exercise(&self, id: &str) -> Result<(), AppError> {
        self.db
            .delete_document(collections::EXERCISES, id, None)
            .await
            .map_err(|e| AppError::wrap_service(&format!("Failed to delete exercise {}", id), e))
    }
}
