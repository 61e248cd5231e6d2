// SPDX-License-Identifier: MIT

//! Workout model.

use crate::models::Exercise;
use serde::{Deserialize, Serialize};

/// A workout owned by one user.
///
/// Invariant: every exercise in `exercises` carries this workout's id as
/// its `workoutId` and this workout's `userId` as its owner. The list is
/// populated only after all member exercise documents have been created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default, alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 timestamp; defaults to the creation time when absent.
    pub date: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Caller-supplied fields for a new workout; the assembly workflow fills
/// in the rest.
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    #[validate(length(min = 1, message = "Workout name cannot be empty"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Partial workout update; only present fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Workout name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
