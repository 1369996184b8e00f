//! Common HTTP building blocks

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Standard API response wrapper.
///
/// Every REST endpoint returns data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Translate a domain failure into a transport-level error response.
pub fn domain_error<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::DuplicateEmail(_)
        | DomainError::AlreadyActivated
        | DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::AccountDisabled => StatusCode::FORBIDDEN,
        DomainError::InvalidRole(_)
        | DomainError::InvalidDate(_)
        | DomainError::InvalidEnum { .. }
        | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ApiResponse::error(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses_match_the_failure_kind() {
        let (status, _) = domain_error::<()>(DomainError::InvalidCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = domain_error::<()>(DomainError::AccountDisabled);
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = domain_error::<()>(DomainError::DuplicateEmail("x@y.z".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = domain_error::<()>(DomainError::not_found("User", "id", 1));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
