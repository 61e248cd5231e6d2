// SPDX-License-Identifier: MIT

//! Workout-scoped exercise model.

use crate::models::library::{Intensity, LibraryEntry};
use serde::{Deserialize, Serialize};

/// Default sets for an exercise created by workout assembly.
pub const DEFAULT_SETS: u32 = 4;
/// Default reps for an exercise created by workout assembly.
pub const DEFAULT_REPS: u32 = 12;

/// An exercise instance owned by exactly one workout and one user.
///
/// Always created as a snapshot copy of a library entry; it carries no
/// foreign key back to the library, so the two can diverge freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default, alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub equipment: Vec<String>,
    pub muscles_worked: Vec<String>,
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
}

impl Exercise {
    /// Snapshot a library entry into a new exercise for a workout.
    ///
    /// Copies `{name, equipment, musclesWorked, intensity}` and starts at
    /// the fixed 4x12 defaults regardless of library metadata.
    pub fn from_library_entry(entry: &LibraryEntry, workout_id: &str, user_id: &str) -> Self {
        Self {
            id: None,
            workout_id: Some(workout_id.to_string()),
            user_id: user_id.to_string(),
            name: entry.name.clone(),
            equipment: entry.equipment.clone(),
            muscles_worked: entry.muscles_worked.clone(),
            intensity: entry.intensity,
            sets: Some(DEFAULT_SETS),
            reps: Some(DEFAULT_REPS),
        }
    }
}

/// Partial exercise update; only present fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Exercise name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscles_worked: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
}
