use poem_openapi::{payload::Json, ApiResponse, Object};

use super::InternalError;

/// Standardized error response body
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

/// Transport-level error responses shared by all endpoints
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed or missing required input
    #[oai(status = 400)]
    Validation(Json<ErrorBody>),

    /// Missing, invalid or expired token, or invalid credentials
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorBody>),

    /// Valid token but insufficient role
    #[oai(status = 403)]
    Unauthorized(Json<ErrorBody>),

    /// No matching record
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Uniqueness violation
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(Json(ErrorBody {
            error: "validation".to_string(),
            message: message.into(),
        }))
    }

    /// Uniform invalid-credentials response; deliberately identical for
    /// unknown usernames and wrong passwords.
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthenticated(Json(ErrorBody {
            error: "invalid_credentials".to_string(),
            message: "Invalid username or password".to_string(),
        }))
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated(Json(ErrorBody {
            error: "unauthenticated".to_string(),
            message: "Authentication required".to_string(),
        }))
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorBody {
            error: "not_found".to_string(),
            message: format!("{} not found", entity.into()),
        }))
    }

    pub fn conflict() -> Self {
        ApiError::Conflict(Json(ErrorBody {
            error: "conflict".to_string(),
            message: "Value already in use".to_string(),
        }))
    }

    pub fn internal() -> Self {
        ApiError::Internal(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
        }))
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::NotFound { entity } => ApiError::not_found(entity),
            InternalError::Conflict { .. } => ApiError::conflict(),
            InternalError::InvalidCredentials => ApiError::invalid_credentials(),
            InternalError::Validation { message } => ApiError::validation(message),
            InternalError::UnmappedRole { .. }
            | InternalError::Crypto { .. }
            | InternalError::Token { .. }
            | InternalError::Database { .. } => {
                tracing::error!(error = %err, "request failed with internal error");
                ApiError::internal()
            }
        }
    }
}
