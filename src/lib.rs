// SPDX-License-Identifier: MIT

//! FitForge: fitness-tracking backend API.
//!
//! Users submit workouts, exercises, and trainer questions, backed by
//! Firestore and JWT-based identity. Workout creation assembles a workout
//! from snapshot copies of shared exercise-library entries.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{
    ExerciseLibraryService, ExerciseService, QuestionService, UserService, WorkoutService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: UserService,
    pub workouts: WorkoutService,
    pub exercises: ExerciseService,
    pub library: ExerciseLibraryService,
    pub questions: QuestionService,
}

impl AppState {
    /// Wire all services onto one database handle.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        Self {
            config,
            users: UserService::new(db.clone()),
            workouts: WorkoutService::new(db.clone()),
            exercises: ExerciseService::new(db.clone()),
            library: ExerciseLibraryService::new(db.clone()),
            questions: QuestionService::new(db),
        }
    }
}
