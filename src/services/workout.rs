// SPDX-License-Identifier: MIT

//! Workout service, including the workout assembly workflow.
//!
//! Assembly is the one multi-step, multi-entity operation in the core:
//! it creates a workout document, snapshots the requested library entries
//! into per-workout exercise documents, and publishes the created list
//! back onto the workout.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::models::{Exercise, LibraryEntry, NewWorkout, Workout, WorkoutPatch};
use axum::http::StatusCode;
use futures_util::{stream, StreamExt};
use serde_json::json;

const MAX_CONCURRENT_DB_OPS: usize = 50;

#[derive(Clone)]
pub struct WorkoutService {
    db: FirestoreDb,
}

impl WorkoutService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Assemble a workout from a set of library-exercise references.
    ///
    /// Steps, in order (later steps depend on the id produced earlier):
    /// 1. default `date` to now if absent
    /// 2. create the workout with an empty exercise list, establishing
    ///    its id
    /// 3. re-fetch the just-created workout, guarding against a backend
    ///    that has not yet made the write visible to reads
    /// 4. fetch the library and select entries in the order of
    ///    `exercise_library_ids`; unmatched ids are silently dropped, but
    ///    an empty selection fails
    /// 5. create the snapshot exercises (concurrently; they share no
    ///    state)
    /// 6. publish the created list on the workout document
    ///
    /// Any failure after step 2 triggers a compensating delete of the
    /// placeholder workout and of any snapshot exercises already
    /// committed in step 5, so a failed assembly leaves no orphaned
    /// documents behind.
    pub async fn create_workout(
        &self,
        workout_data: NewWorkout,
        user_id: &str,
        exercise_library_ids: &[String],
    ) -> Result<Workout, AppError> {
        const CONTEXT: &str = "Failed to create workout";

        if user_id.is_empty() {
            return Err(AppError::service_with_status(
                format!("{}: User ID is required to create a workout", CONTEXT),
                "VALIDATION_ERROR",
                StatusCode::BAD_REQUEST,
            ));
        }
        if workout_data.name.trim().is_empty() {
            return Err(AppError::service_with_status(
                format!("{}: Workout name cannot be empty", CONTEXT),
                "VALIDATION_ERROR",
                StatusCode::BAD_REQUEST,
            ));
        }

        let mut workout = Workout {
            id: None,
            user_id: user_id.to_string(),
            name: workout_data.name,
            description: workout_data.description,
            date: workout_data
                .date
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            exercises: Vec::new(),
        };

        let workout_id = self
            .db
            .create_document(collections::WORKOUTS, &workout, None)
            .await
            .map_err(|e| AppError::wrap_service(CONTEXT, e))?;
        workout.id = Some(workout_id.clone());

        match self
            .assemble_exercises(&workout_id, user_id, exercise_library_ids)
            .await
        {
            Ok(exercises) => {
                tracing::info!(
                    workout_id,
                    user_id,
                    exercise_count = exercises.len(),
                    "Workout assembled"
                );
                workout.exercises = exercises;
                Ok(workout)
            }
            Err(err) => {
                // The placeholder committed in step 2, and some snapshot
                // exercises may have committed in step 5; remove them all
                // so the failure leaves no orphans behind.
                if let Err(cleanup) = self.delete_workout(&workout_id).await {
                    tracing::warn!(
                        workout_id,
                        error = %cleanup,
                        "Failed to clean up after aborted assembly"
                    );
                }
                Err(AppError::wrap_service(CONTEXT, err))
            }
        }
    }

    /// Steps 3-6 of assembly; runs after the placeholder workout exists.
    async fn assemble_exercises(
        &self,
        workout_id: &str,
        user_id: &str,
        exercise_library_ids: &[String],
    ) -> Result<Vec<Exercise>, AppError> {
        let _: Workout = self
            .db
            .get_document_by_id(collections::WORKOUTS, workout_id)
            .await?;

        let catalog: Vec<LibraryEntry> = self
            .db
            .get_documents(collections::EXERCISE_LIBRARY)
            .await?;

        let selected: Vec<&LibraryEntry> = exercise_library_ids
            .iter()
            .filter_map(|id| {
                catalog
                    .iter()
                    .find(|entry| entry.id.as_deref() == Some(id.as_str()))
            })
            .collect();

        if selected.is_empty() {
            return Err(AppError::service(
                "No matching exercises found in the exercise library",
                "EXERCISES_NOT_FOUND",
            ));
        }

        // `buffered` (not buffer_unordered) keeps the selection order in
        // the output.
        let snapshots: Vec<Exercise> = selected
            .into_iter()
            .map(|entry| Exercise::from_library_entry(entry, workout_id, user_id))
            .collect();
        let created: Vec<Result<Exercise, AppError>> = stream::iter(
            snapshots
                .into_iter()
                .map(|exercise| async move {
                    let id = self
                        .db
                        .create_document(collections::EXERCISES, &exercise, None)
                        .await?;
                    Ok(Exercise {
                        id: Some(id),
                        ..exercise
                    })
                }),
        )
        .buffered(MAX_CONCURRENT_DB_OPS)
        .collect()
        .await;

        let exercises: Vec<Exercise> = created.into_iter().collect::<Result<_, _>>()?;

        self.db
            .update_document(
                collections::WORKOUTS,
                workout_id,
                &json!({ "exercises": exercises }),
            )
            .await?;

        Ok(exercises)
    }

    /// Retrieve all workouts owned by a user.
    pub async fn get_workouts_by_user(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        let workouts: Vec<Workout> = self
            .db
            .get_documents(collections::WORKOUTS)
            .await
            .map_err(|e| {
                AppError::wrap_service(
                    &format!("Failed to retrieve workouts for user {}", user_id),
                    e,
                )
            })?;

        Ok(workouts
            .into_iter()
            .filter(|workout| workout.user_id == user_id)
            .collect())
    }

    pub async fn get_workout_by_id(&self, id: &str) -> Result<Workout, AppError> {
        let mut workout: Workout = self
            .db
            .get_document_by_id(collections::WORKOUTS, id)
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to retrieve workout {}", id), e)
            })?;

        workout.id = Some(id.to_string());
        Ok(workout)
    }

    pub async fn update_workout(
        &self,
        id: &str,
        patch: &WorkoutPatch,
    ) -> Result<serde_json::Value, AppError> {
        self.db
            .update_document(collections::WORKOUTS, id, patch)
            .await
            .map_err(|e| AppError::wrap_service(&format!("Failed to update workout {}", id), e))?;

        let mut value = serde_json::to_value(patch)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        value["id"] = json!(id);
        Ok(value)
    }

    /// Delete a workout together with the snapshot exercises attached to
    /// it. Also the cleanup path for a failed assembly.
    pub async fn delete_workout(&self, id: &str) -> Result<(), AppError> {
        let context = || format!("Failed to delete workout {}", id);

        self.db
            .delete_documents_by_fields(collections::EXERCISES, &[("workoutId", id)], None)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))?;

        self.db
            .delete_document(collections::WORKOUTS, id, None)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))
    }
}
