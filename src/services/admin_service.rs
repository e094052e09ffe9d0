use std::sync::Arc;

use chrono::Utc;
use sea_orm::Set;

use crate::auth::password;
use crate::errors::InternalError;
use crate::query::{AdminFilter, Pagination, SortOrder};
use crate::stores::{AdminStore, RoleStore};
use crate::types::db::{admin, role};
use crate::types::internal::RoleName;

/// Inputs for creating or updating an administrator. Identity and
/// server-owned fields (id, timestamps, last login) have no representation
/// here, so clients cannot supply them.
#[derive(Debug, Default)]
pub struct AdminChanges {
    pub role_id: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct AdminService {
    admin_store: Arc<AdminStore>,
    role_store: Arc<RoleStore>,
}

impl AdminService {
    pub fn new(admin_store: Arc<AdminStore>, role_store: Arc<RoleStore>) -> Self {
        Self {
            admin_store,
            role_store,
        }
    }

    pub async fn create(
        &self,
        role_id: i64,
        username: &str,
        password_input: &str,
    ) -> Result<admin::Model, InternalError> {
        let password_hash = password::hash(password_input)?;
        let now = Utc::now();

        self.admin_store
            .create(admin::ActiveModel {
                role_id: Set(role_id),
                username: Set(username.to_owned()),
                password_hash: Set(password_hash),
                create_at: Set(now),
                update_at: Set(now),
                ..Default::default()
            })
            .await
    }

    pub async fn get(
        &self,
        filter: &AdminFilter,
    ) -> Result<(admin::Model, Option<role::Model>), InternalError> {
        self.admin_store.get(filter).await
    }

    pub async fn get_all(
        &self,
        filter: &AdminFilter,
        sort_order: &SortOrder,
        mut pagination: Option<&mut Pagination>,
    ) -> Result<Vec<(admin::Model, Option<role::Model>)>, InternalError> {
        let admins = self
            .admin_store
            .get_all(filter, sort_order, pagination.as_deref_mut())
            .await?;

        if let Some(pagination) = pagination {
            pagination.calculate_total();
        }

        Ok(admins)
    }

    /// Partial update; a supplied password is rehashed, absent fields stay
    /// untouched.
    pub async fn update(&self, id: i64, changes: AdminChanges) -> Result<(), InternalError> {
        let mut active = admin::ActiveModel {
            update_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(role_id) = changes.role_id {
            active.role_id = Set(role_id);
        }
        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(password_input) = changes.password {
            active.password_hash = Set(password::hash(&password_input)?);
        }

        self.admin_store.update(id, active).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), InternalError> {
        self.admin_store.delete(id).await
    }

    /// One-time bootstrap: seed the super-admin role and the first
    /// super-administrator account.
    ///
    /// The role insert is idempotent; a second bootstrap attempt fails on
    /// the admin's unique username instead of silently succeeding.
    pub async fn initial(&self) -> Result<admin::Model, InternalError> {
        let role = self
            .role_store
            .find_or_create(RoleName::SuperAdmin.as_str())
            .await?;

        self.create(role.id, "superadmin", "superadmin").await
    }
}
