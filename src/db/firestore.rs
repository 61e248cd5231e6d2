// SPDX-License-Identifier: MIT

//! Firestore client wrapper with generic document operations.
//!
//! Entity services talk to Firestore only through this adapter. Every
//! backend failure is translated into a uniform repository error carrying
//! a machine-readable code and an HTTP status (see
//! [`crate::error::firestore_error_class`]); raw Firestore errors never
//! leave this module.

use crate::error::{firestore_error_class, AppError};
use axum::http::StatusCode;
use firestore::FirestoreTransaction;
use serde::{de::DeserializeOwned, Serialize};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

fn repository_error(context: String, err: firestore::errors::FirestoreError) -> AppError {
    let (code, status) = firestore_error_class(&err);
    AppError::repository(format!("{}: {}", context, err), code, status)
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| repository_error("Failed to connect to Firestore".to_string(), e))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| repository_error("Failed to connect to Firestore Emulator".to_string(), e))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::repository(
                "Database not connected (offline mode)".to_string(),
                "UNAVAILABLE",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        })
    }

    // ─── Document Operations ─────────────────────────────────────

    /// Create a document, returning its id.
    ///
    /// If `id` is given it is used as the document key with upsert
    /// semantics (an existing document with the same id is overwritten);
    /// otherwise a fresh id is generated, matching Firestore's
    /// client-side auto-id behavior.
    pub async fn create_document<T>(
        &self,
        collection: &str,
        data: &T,
        id: Option<&str>,
    ) -> Result<String, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let doc_id = match id {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(&doc_id)
            .object(data)
            .execute()
            .await
            .map_err(|e| {
                repository_error(format!("Failed to create document in {}", collection), e)
            })?;

        Ok(doc_id)
    }

    /// Retrieve every document in a collection.
    ///
    /// No pagination; callers filter in memory. Fine for the collection
    /// sizes this service handles, but a ceiling worth knowing about.
    pub async fn get_documents<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await
            .map_err(|e| {
                repository_error(format!("Failed to fetch documents from {}", collection), e)
            })
    }

    /// Retrieve a document by id, failing with DOCUMENT_NOT_FOUND if absent.
    pub async fn get_document_by_id<T>(&self, collection: &str, id: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let doc: Option<T> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| {
                repository_error(
                    format!("Failed to fetch document {} from {}", id, collection),
                    e,
                )
            })?;

        doc.ok_or_else(|| {
            AppError::repository(
                format!(
                    "Document not found in collection {} with id {}",
                    collection, id
                ),
                "DOCUMENT_NOT_FOUND",
                StatusCode::NOT_FOUND,
            )
        })
    }

    /// Retrieve all documents where `field == value`, failing with
    /// DOCUMENTS_NOT_FOUND if nothing matches.
    pub async fn get_documents_by_field<T>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        limit: Option<u32>,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let field_owned = field.to_string();
        let value_owned = value.to_string();

        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| q.field(field_owned.clone()).eq(value_owned.clone()));

        let query = if let Some(limit) = limit {
            query.limit(limit)
        } else {
            query
        };

        let docs: Vec<T> = query.obj().query().await.map_err(|e| {
            repository_error(
                format!(
                    "Failed to fetch documents from {} where {} == {}",
                    collection, field, value
                ),
                e,
            )
        })?;

        if docs.is_empty() {
            return Err(AppError::repository(
                format!(
                    "No documents found in collection {} where {} == {}",
                    collection, field, value
                ),
                "DOCUMENTS_NOT_FOUND",
                StatusCode::NOT_FOUND,
            ));
        }

        Ok(docs)
    }

    /// Merge the fields of `data` into an existing document.
    ///
    /// Only the fields present in the serialized form are written; the
    /// rest of the document is left untouched. Existence is not verified
    /// first.
    pub async fn update_document<T>(
        &self,
        collection: &str,
        id: &str,
        data: &T,
    ) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        // Update mask = the serialized top-level fields, so absent
        // (skipped) fields never clobber stored values.
        let value = serde_json::to_value(data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize update: {}", e)))?;
        let fields: Vec<String> = value
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(fields)
            .in_col(collection)
            .document_id(id)
            .object(data)
            .execute()
            .await
            .map_err(|e| {
                repository_error(
                    format!("Failed to update document {} in {}", id, collection),
                    e,
                )
            })?;

        Ok(())
    }

    /// Delete one document.
    ///
    /// Inside a transaction the deletion is staged and only takes effect
    /// on commit.
    pub async fn delete_document(
        &self,
        collection: &str,
        id: &str,
        transaction: Option<&mut FirestoreTransaction<'_>>,
    ) -> Result<(), AppError> {
        let builder = self
            .get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id);

        match transaction {
            Some(t) => {
                builder.add_to_transaction(t).map_err(|e| {
                    repository_error(
                        format!(
                            "Failed to add deletion of {} in {} to transaction",
                            id, collection
                        ),
                        e,
                    )
                })?;
            }
            None => {
                builder.execute().await.map_err(|e| {
                    repository_error(
                        format!("Failed to delete document {} from {}", id, collection),
                        e,
                    )
                })?;
            }
        }

        Ok(())
    }

    /// Delete every document matching an AND of equality predicates.
    ///
    /// Uses chunked transactional batches outside a caller transaction,
    /// and stages deletes on the caller's transaction when given one.
    pub async fn delete_documents_by_fields(
        &self,
        collection: &str,
        field_value_pairs: &[(&str, &str)],
        transaction: Option<&mut FirestoreTransaction<'_>>,
    ) -> Result<usize, AppError> {
        let pairs: Vec<(String, String)> = field_value_pairs
            .iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect();
        let describe = pairs
            .iter()
            .map(|(f, v)| format!("{} == {}", f, v))
            .collect::<Vec<_>>()
            .join(" AND ");

        let filter_pairs = pairs.clone();
        let docs = self
            .get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| {
                let conditions: Vec<_> = filter_pairs
                    .iter()
                    .map(|(f, v)| q.field(f.clone()).eq(v.clone()))
                    .collect();
                q.for_all(conditions)
            })
            .query()
            .await
            .map_err(|e| {
                repository_error(
                    format!(
                        "Failed to query documents in {} where {}",
                        collection, describe
                    ),
                    e,
                )
            })?;

        let ids: Vec<String> = docs
            .iter()
            .map(|doc| {
                doc.name
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();

        match transaction {
            Some(t) => {
                for id in &ids {
                    self.delete_document(collection, id, Some(&mut *t)).await?;
                }
            }
            None => self.batch_delete(collection, &ids).await?,
        }

        tracing::debug!(
            collection,
            count = ids.len(),
            "Deleted documents by field filter"
        );

        Ok(ids.len())
    }

    // ─── Transactions ────────────────────────────────────────────

    /// Begin a transaction; all staged writes commit atomically or fail
    /// wholesale.
    pub async fn begin_transaction(&self) -> Result<FirestoreTransaction<'_>, AppError> {
        self.get_client()?.begin_transaction().await.map_err(|e| {
            let (_, status) = firestore_error_class(&e);
            AppError::repository(
                format!("Failed to begin transaction: {}", e),
                "TRANSACTION_FAILED",
                status,
            )
        })
    }

    /// Commit a transaction, surfacing TRANSACTION_FAILED on failure.
    pub async fn commit_transaction(
        &self,
        transaction: FirestoreTransaction<'_>,
    ) -> Result<(), AppError> {
        transaction.commit().await.map_err(|e| {
            let (_, status) = firestore_error_class(&e);
            AppError::repository(
                format!("Transaction failed: {}", e),
                "TRANSACTION_FAILED",
                status,
            )
        })?;
        Ok(())
    }

    /// Helper to batch delete documents using chunked transactions.
    async fn batch_delete(&self, collection: &str, ids: &[String]) -> Result<(), AppError> {
        for chunk in ids.chunks(BATCH_SIZE) {
            let mut transaction = self.begin_transaction().await?;

            for id in chunk {
                self.delete_document(collection, id, Some(&mut transaction))
                    .await?;
            }

            self.commit_transaction(transaction).await?;
        }

        Ok(())
    }
}
