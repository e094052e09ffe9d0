use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::query::{self, AdminFilter, Pagination, SortOrder};
use crate::types::db::{admin, role};

use super::conflict_or_database;

/// Persistence access for administrator records.
///
/// Reads exclude soft-deleted rows and eagerly join the admin's role; a
/// missing role row comes back as `None`, not an error.
pub struct AdminStore {
    db: DatabaseConnection,
}

impl AdminStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, active: admin::ActiveModel) -> Result<admin::Model, InternalError> {
        active
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_database("create_admin", e))
    }

    /// Get one admin matching the populated filter fields.
    ///
    /// Get-by-id and get-by-username share this path: whatever is populated
    /// becomes an equality predicate.
    pub async fn get(
        &self,
        filter: &AdminFilter,
    ) -> Result<(admin::Model, Option<role::Model>), InternalError> {
        query::find_one::<admin::Entity, role::Entity, _>(&self.db, filter.condition()).await
    }

    pub async fn get_all(
        &self,
        filter: &AdminFilter,
        sort_order: &SortOrder,
        pagination: Option<&mut Pagination>,
    ) -> Result<Vec<(admin::Model, Option<role::Model>)>, InternalError> {
        query::find_page::<admin::Entity, role::Entity, _>(
            &self.db,
            filter.condition(),
            sort_order,
            pagination,
        )
        .await
    }

    /// Partial update of a live (non-deleted) admin; only set columns are
    /// written.
    pub async fn update(&self, id: i64, active: admin::ActiveModel) -> Result<(), InternalError> {
        let result = admin::Entity::update_many()
            .set(active)
            .filter(admin::Column::Id.eq(id))
            .filter(admin::Column::DeleteAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| conflict_or_database("update_admin", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found("admin"));
        }
        Ok(())
    }

    /// Soft delete: stamp `delete_at`, keep the row.
    pub async fn delete(&self, id: i64) -> Result<(), InternalError> {
        let active = admin::ActiveModel {
            delete_at: Set(Some(Utc::now())),
            ..Default::default()
        };

        let result = admin::Entity::update_many()
            .set(active)
            .filter(admin::Column::Id.eq(id))
            .filter(admin::Column::DeleteAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_admin", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found("admin"));
        }
        Ok(())
    }
}
