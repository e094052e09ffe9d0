use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::types::db::role;

use super::conflict_or_database;

pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<role::Model>, InternalError> {
        role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role_by_name", e))
    }

    pub async fn create(&self, name: &str) -> Result<role::Model, InternalError> {
        let active = role::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };

        active
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_database("create_role", e))
    }

    /// Idempotent lookup-or-insert used by the bootstrap flow.
    pub async fn find_or_create(&self, name: &str) -> Result<role::Model, InternalError> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }
        self.create(name).await
    }
}
