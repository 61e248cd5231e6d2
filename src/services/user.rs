// SPDX-License-Identifier: MIT

//! User service.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::models::{Role, User, UserPatch};
use serde_json::json;

/// Maps user operations to document-store calls.
#[derive(Clone)]
pub struct UserService {
    db: FirestoreDb,
}

impl UserService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Create a user profile keyed by the identity-provider subject id.
    ///
    /// The document id is never generated here; same-subject authorization
    /// relies on it matching the token's subject claim.
    pub async fn create_user(&self, mut user: User, uid: &str) -> Result<User, AppError> {
        // The id lives in the document key only, never as a stored field.
        user.id = None;

        self.db
            .create_document(collections::USERS, &user, Some(uid))
            .await
            .map_err(|e| AppError::wrap_service("Failed to create user", e))?;

        user.id = Some(uid.to_string());
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<User, AppError> {
        let mut user: User = self
            .db
            .get_document_by_id(collections::USERS, id)
            .await
            .map_err(|e| AppError::wrap_service(&format!("Failed to retrieve user {}", id), e))?;

        user.id = Some(id.to_string());
        Ok(user)
    }

    /// Merge `patch` into the stored user.
    ///
    /// Returns the id plus the fields the caller sent, not the merged
    /// server state; callers needing the authoritative document re-fetch.
    pub async fn update_user(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<serde_json::Value, AppError> {
        self.db
            .update_document(collections::USERS, id, patch)
            .await
            .map_err(|e| AppError::wrap_service(&format!("Failed to update user {}", id), e))?;

        let mut value = serde_json::to_value(patch)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        value["id"] = json!(id);
        Ok(value)
    }

    /// Set a user's stored role (admin claims operation).
    ///
    /// Sessions minted after the change carry the new role claim.
    pub async fn set_role(&self, id: &str, role: Role) -> Result<(), AppError> {
        self.db
            .update_document(collections::USERS, id, &json!({ "role": role }))
            .await
            .map_err(|e| {
                AppError::wrap_service(&format!("Failed to set role for user {}", id), e)
            })
    }

    /// Delete a user and the workouts and exercises they own.
    ///
    /// Questions are retained: answered questions document trainer work
    /// and carry no personal data beyond the subject id.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let context = || format!("Failed to delete user {}", id);

        self.db
            .delete_documents_by_fields(collections::EXERCISES, &[("userId", id)], None)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))?;

        self.db
            .delete_documents_by_fields(collections::WORKOUTS, &[("userId", id)], None)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))?;

        self.db
            .delete_document(collections::USERS, id, None)
            .await
            .map_err(|e| AppError::wrap_service(&context(), e))?;

        tracing::info!(user_id = id, "User and owned records deleted");
        Ok(())
    }
}
