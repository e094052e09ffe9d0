use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::query::{self, Pagination, SortOrder, UserFilter};
use crate::types::db::{admin, user};

use super::conflict_or_database;

/// Persistence access for managed user records.
///
/// Reads exclude soft-deleted rows and eagerly join the owning admin.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, active: user::ActiveModel) -> Result<user::Model, InternalError> {
        active
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_database("create_user", e))
    }

    pub async fn get(
        &self,
        filter: &UserFilter,
    ) -> Result<(user::Model, Option<admin::Model>), InternalError> {
        query::find_one::<user::Entity, admin::Entity, _>(&self.db, filter.condition()).await
    }

    pub async fn get_all(
        &self,
        filter: &UserFilter,
        sort_order: &SortOrder,
        pagination: Option<&mut Pagination>,
    ) -> Result<Vec<(user::Model, Option<admin::Model>)>, InternalError> {
        query::find_page::<user::Entity, admin::Entity, _>(
            &self.db,
            filter.condition(),
            sort_order,
            pagination,
        )
        .await
    }

    pub async fn update(&self, id: i64, active: user::ActiveModel) -> Result<(), InternalError> {
        let result = user::Entity::update_many()
            .set(active)
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeleteAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| conflict_or_database("update_user", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found("user"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), InternalError> {
        let active = user::ActiveModel {
            delete_at: Set(Some(Utc::now())),
            ..Default::default()
        };

        let result = user::Entity::update_many()
            .set(active)
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeleteAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found("user"));
        }
        Ok(())
    }
}
