// Stores layer - persistence access per entity
pub mod admin_store;
pub mod role_store;
pub mod user_store;

pub use admin_store::AdminStore;
pub use role_store::RoleStore;
pub use user_store::UserStore;

use sea_orm::{DbErr, SqlErr};

use crate::errors::InternalError;

/// Classify a write error: unique-index violations become conflicts, and
/// everything else stays a database error.
pub(crate) fn conflict_or_database(operation: &'static str, err: DbErr) -> InternalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(constraint)) => {
            InternalError::Conflict { constraint }
        }
        _ => InternalError::database(operation, err),
    }
}
