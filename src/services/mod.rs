// SPDX-License-Identifier: MIT

//! Services module - business logic layer.
//!
//! Each service owns one collection and rewraps every repository failure
//! with operation context before it crosses the service boundary.

pub mod exercise;
pub mod library;
pub mod question;
pub mod user;
pub mod workout;

pub use exercise::ExerciseService;
pub use library::ExerciseLibraryService;
pub use question::QuestionService;
pub use user::UserService;
pub use workout::WorkoutService;
