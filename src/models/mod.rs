// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod exercise;
pub mod library;
pub mod question;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, ExercisePatch};
pub use library::{Intensity, LibraryEntry, LibraryEntryPatch};
pub use question::Question;
pub use user::{Role, User, UserPatch};
pub use workout::{NewWorkout, Workout, WorkoutPatch};
