// SPDX-License-Identifier: MIT

//! Exercise library model: the trainer-curated global catalog.

use serde::{Deserialize, Serialize};

/// Exercise intensity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// A reusable exercise template in the global library.
///
/// Distinct from [`crate::models::Exercise`]: library entries are never
/// attached to a workout. Workout assembly copies their fields into new
/// exercise documents, so later edits here do not alter past workouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    #[serde(default, alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub equipment: Vec<String>,
    pub muscles_worked: Vec<String>,
    pub intensity: Intensity,
}

/// Partial library-entry update; only present fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Exercise name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscles_worked: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
}
