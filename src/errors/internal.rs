use thiserror::Error;

/// Internal error type for store and service operations.
///
/// Not exposed via the API - endpoints convert to `ApiError`, which decides
/// the transport status. Keeping `NotFound` and `InvalidCredentials` as
/// separate values lets login handlers log which one happened while still
/// collapsing both into one external outcome.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("unique value conflict: {constraint}")]
    Conflict { constraint: String },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("role {name:?} has no claim mapping")]
    UnmappedRole { name: String },

    #[error("invalid input: {message}")]
    Validation { message: String },

    #[error("crypto error: {operation} failed: {message}")]
    Crypto {
        operation: &'static str,
        message: String,
    },

    #[error("token error: {message}")]
    Token { message: String },

    #[error("database error: {operation} failed: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl InternalError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        InternalError::NotFound {
            entity: entity.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        InternalError::Validation {
            message: message.into(),
        }
    }

    pub fn database(operation: &'static str, source: sea_orm::DbErr) -> Self {
        InternalError::Database { operation, source }
    }
}
