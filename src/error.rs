// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.
//!
//! Every error kind carries a machine-readable `code` alongside the
//! human-readable message; the boundary renders all of them through the
//! same `{status: "error", message, code}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error code used when a failure cannot be classified.
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Token missing, invalid, or rejected by the verifier.
    #[error("{message}")]
    Authentication { message: String, code: String },

    /// Role/ownership check failed.
    #[error("{message}")]
    Authorization { message: String, code: String },

    /// Request payload failed schema rules.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A document-store operation failed.
    #[error("{message}")]
    Repository {
        message: String,
        code: String,
        status: StatusCode,
    },

    /// Business-rule violation or wrapped repository failure.
    #[error("{message}")]
    Service {
        message: String,
        code: String,
        status: StatusCode,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn authentication(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn authorization(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn repository(
        message: impl Into<String>,
        code: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self::Repository {
            message: message.into(),
            code: code.into(),
            status,
        }
    }

    /// Service error with the default 500 status.
    pub fn service(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            code: code.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn service_with_status(
        message: impl Into<String>,
        code: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self::Service {
            message: message.into(),
            code: code.into(),
            status,
        }
    }

    /// Rewrap a lower-layer failure as a service error with added context.
    ///
    /// The original code and status survive the wrapping so the boundary
    /// still renders the right HTTP status; only the message gains the
    /// operation context. Raw backend errors never cross a service
    /// boundary unwrapped.
    pub fn wrap_service(context: &str, err: AppError) -> AppError {
        match err {
            AppError::Repository {
                message,
                code,
                status,
            }
            | AppError::Service {
                message,
                code,
                status,
            } => AppError::Service {
                message: format!("{}: {}", context, message),
                code,
                status,
            },
            other => AppError::Service {
                message: format!("{}: {}", context, other),
                code: UNKNOWN_ERROR_CODE.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// The machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            AppError::Authentication { code, .. }
            | AppError::Authorization { code, .. }
            | AppError::Repository { code, .. }
            | AppError::Service { code, .. } => code,
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => UNKNOWN_ERROR_CODE,
        }
    }

    /// The HTTP status this error renders as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            AppError::Authorization { .. } => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Repository { status, .. } | AppError::Service { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Map a Firestore backend failure to a uniform (code, status) pair.
///
/// Mirrors the gRPC status mapping: not-found → 404, already-exists → 409,
/// permission-denied → 403, unauthenticated → 401, invalid-argument → 400,
/// everything else → 500.
pub fn firestore_error_class(err: &firestore::errors::FirestoreError) -> (String, StatusCode) {
    use firestore::errors::FirestoreError;

    match err {
        FirestoreError::DataNotFoundError(_) => ("not-found".to_string(), StatusCode::NOT_FOUND),
        FirestoreError::DataConflictError(_) => {
            ("already-exists".to_string(), StatusCode::CONFLICT)
        }
        FirestoreError::InvalidParametersError(_) => {
            ("invalid-argument".to_string(), StatusCode::BAD_REQUEST)
        }
        other => {
            // gRPC-level denials surface through the generic database error;
            // classify them by status name in the message.
            let text = other.to_string();
            if text.contains("PermissionDenied") || text.contains("permission-denied") {
                ("permission-denied".to_string(), StatusCode::FORBIDDEN)
            } else if text.contains("Unauthenticated") || text.contains("unauthenticated") {
                ("unauthenticated".to_string(), StatusCode::UNAUTHORIZED)
            } else {
                (
                    UNKNOWN_ERROR_CODE.to_string(),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for e in field_errors {
                let rule = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                parts.push(format!("{}: {}", field, rule));
            }
        }
        parts.sort();
        AppError::Validation(parts.join(", "))
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, code) = match &self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    "An unexpected error occurred".to_string(),
                    UNKNOWN_ERROR_CODE.to_string(),
                )
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, code = other.code(), "Request failed");
                }
                (other.to_string(), other.code().to_string())
            }
        };

        let body = ErrorResponse {
            status: "error",
            message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_service_preserves_code_and_status() {
        let inner = AppError::repository(
            "Document not found in collection users with id u1",
            "DOCUMENT_NOT_FOUND",
            StatusCode::NOT_FOUND,
        );
        let wrapped = AppError::wrap_service("Failed to retrieve user u1", inner);

        assert_eq!(wrapped.code(), "DOCUMENT_NOT_FOUND");
        assert_eq!(wrapped.status_code(), StatusCode::NOT_FOUND);
        assert!(wrapped
            .to_string()
            .starts_with("Failed to retrieve user u1:"));
    }

    #[test]
    fn wrap_service_collapses_unknown_kinds() {
        let inner = AppError::Internal(anyhow::anyhow!("boom"));
        let wrapped = AppError::wrap_service("Failed to create workout", inner);

        assert_eq!(wrapped.code(), UNKNOWN_ERROR_CODE);
        assert_eq!(wrapped.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn firestore_backend_codes_map_to_http_statuses() {
        use firestore::errors::{
            FirestoreDataConflictError, FirestoreDataNotFoundError, FirestoreError,
            FirestoreErrorPublicGenericDetails, FirestoreInvalidParametersError,
            FirestoreInvalidParametersPublicDetails,
        };

        let not_found = FirestoreError::DataNotFoundError(FirestoreDataNotFoundError::new(
            FirestoreErrorPublicGenericDetails::new("NotFound".to_string()),
            "missing document".to_string(),
        ));
        assert_eq!(
            firestore_error_class(&not_found),
            ("not-found".to_string(), StatusCode::NOT_FOUND)
        );

        let conflict = FirestoreError::DataConflictError(FirestoreDataConflictError::new(
            FirestoreErrorPublicGenericDetails::new("AlreadyExists".to_string()),
            "document already exists".to_string(),
        ));
        assert_eq!(
            firestore_error_class(&conflict),
            ("already-exists".to_string(), StatusCode::CONFLICT)
        );

        let invalid =
            FirestoreError::InvalidParametersError(FirestoreInvalidParametersError::new(
                FirestoreInvalidParametersPublicDetails::new(
                    "limit".to_string(),
                    "must be positive".to_string(),
                ),
            ));
        assert_eq!(
            firestore_error_class(&invalid),
            ("invalid-argument".to_string(), StatusCode::BAD_REQUEST)
        );
    }

    #[test]
    fn grpc_denials_classify_by_status_name() {
        use firestore::errors::{
            FirestoreError, FirestoreErrorPublicGenericDetails, FirestoreSystemError,
        };

        // Denials surface through generic variants; classification falls
        // back to the status name in the rendered message.
        let system = |message: &str| {
            FirestoreError::SystemError(FirestoreSystemError::new(
                FirestoreErrorPublicGenericDetails::new("GrpcStatus".to_string()),
                message.to_string(),
            ))
        };

        let (code, status) =
            firestore_error_class(&system("status: PermissionDenied, message: denied"));
        assert_eq!(code, "permission-denied");
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (code, status) =
            firestore_error_class(&system("status: Unauthenticated, message: no credentials"));
        assert_eq!(code, "unauthenticated");
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (code, status) =
            firestore_error_class(&system("status: Unavailable, message: try again"));
        assert_eq!(code, UNKNOWN_ERROR_CODE);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_list_every_violated_rule() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1, message = "name cannot be empty"))]
            name: String,
            #[validate(email(message = "email must be valid"))]
            email: String,
        }

        let payload = Payload {
            name: String::new(),
            email: "nope".to_string(),
        };
        let err: AppError = payload.validate().unwrap_err().into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let text = err.to_string();
        assert!(text.contains("name cannot be empty"));
        assert!(text.contains("email must be valid"));
    }
}
