// SPDX-License-Identifier: MIT

//! Exercise library service: the trainer-curated global catalog.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::models::{Intensity, LibraryEntry, LibraryEntryPatch};
use serde_json::json;

/// In-memory filter over the library catalog.
#[derive(Debug, Default, Clone)]
pub struct LibraryFilter {
    pub equipment: Option<Vec<String>>,
    pub muscles_worked: Option<Vec<String>>,
    pub intensity: Option<Intensity>,
}

#[derive(Clone)]
pub struct ExerciseLibraryService {
    db: FirestoreDb,
}

impl ExerciseLibraryService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    pub async fn create_entry(&self, mut entry: LibraryEntry) -> Result<LibraryEntry, AppError> {
        entry.id = None;
        let id = self
            .db
            .create_document(collections::EXERCISE_LIBRARY, &entry, None)
            .await
            .map_err(|e| AppError::wrap_service("Failed to create library entry", e))?;

        entry.id = Some(id);
        Ok(entry)
    }

    /// Fetch the whole catalog and filter it in memory.
    ///
    /// Array filters match when any entry value appears in the requested
    /// set. Full-collection scan; the catalog is small by construction.
    pub async fn get_entries(&self, filter: &LibraryFilter) -> Result<Vec<LibraryEntry>, AppError> {
        let mut entries: Vec<LibraryEntry> = self
            .db
            .get_documents(collections::EXERCISE_LIBRARY)
            .await
            .map_err(|e| AppError::wrap_service("Failed to retrieve library entries", e))?;

        if let Some(equipment) = &filter.equipment {
            entries.retain(|entry| entry.equipment.iter().any(|item| equipment.contains(item)));
        }

        if let Some(muscles) = &filter.muscles_worked {
            entries.retain(|entry| {
                entry
                    .muscles_worked
                    .iter()
                    .any(|muscle| muscles.contains(muscle))
            });
        }

        if let Some(intensity) = filter.intensity {
            entries.retain(|entry| entry.intensity == intensity);
        }

        Ok(entries)
    }

    pub async fn get_entry_by_id(&self, id: &str) -> Result<LibraryEntry, AppError> {
        let mut entry: LibraryEntry = self
            .db
            .get_document_by_id(collections::EXERCISE_LIBRARY, id)
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to retrieve library entry {}", id), e)
            })?;

        entry.id = Some(id.to_string());
        Ok(entry)
    }

    pub async fn update_entry(
        &self,
        id: &str,
        patch: &LibraryEntryPatch,
    ) -> Result<serde_json::Value, AppError> {
        self.db
            .update_document(collections::EXERCISE_LIBRARY, id, patch)
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to update library entry {}", id), e)
            })?;

        let mut value = serde_json::to_value(patch)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        value["id"] = json!(id);
        Ok(value)
    }

    pub async fn delete_entry(&self, id: &str) -> Result<(), AppError> {
        self.db
            .delete_document(collections::EXERCISE_LIBRARY, id, None)
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to delete library entry {}", id), e)
            })
    }
}
