use std::sync::Arc;

use chrono::Utc;
use sea_orm::Set;

use crate::auth::password;
use crate::errors::InternalError;
use crate::query::{Pagination, SortOrder, UserFilter};
use crate::stores::UserStore;
use crate::types::db::{admin, user};

/// Inputs for creating a managed user. The owning admin comes from the
/// caller's claims, never from the body.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

/// Partial update inputs; identity, ownership and server-owned fields are
/// structurally absent.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub struct UserService {
    user_store: Arc<UserStore>,
}

impl UserService {
    pub fn new(user_store: Arc<UserStore>) -> Self {
        Self { user_store }
    }

    pub async fn create(
        &self,
        owner_admin_id: i64,
        new_user: NewUser,
    ) -> Result<user::Model, InternalError> {
        let password_hash = password::hash(&new_user.password)?;
        let now = Utc::now();

        self.user_store
            .create(user::ActiveModel {
                admin_id: Set(owner_admin_id),
                username: Set(new_user.username),
                password_hash: Set(password_hash),
                name: Set(new_user.name),
                phone: Set(new_user.phone),
                is_reset_password: Set(true),
                create_at: Set(now),
                update_at: Set(now),
                ..Default::default()
            })
            .await
    }

    pub async fn get(
        &self,
        filter: &UserFilter,
    ) -> Result<(user::Model, Option<admin::Model>), InternalError> {
        self.user_store.get(filter).await
    }

    pub async fn get_all(
        &self,
        filter: &UserFilter,
        sort_order: &SortOrder,
        mut pagination: Option<&mut Pagination>,
    ) -> Result<Vec<(user::Model, Option<admin::Model>)>, InternalError> {
        let users = self
            .user_store
            .get_all(filter, sort_order, pagination.as_deref_mut())
            .await?;

        if let Some(pagination) = pagination {
            pagination.calculate_total();
        }

        Ok(users)
    }

    /// Partial update. An administrator setting a new password forces the
    /// user through the reset flow on next login.
    pub async fn update(&self, id: i64, changes: UserChanges) -> Result<(), InternalError> {
        let mut active = user::ActiveModel {
            update_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(password_input) = changes.password {
            active.password_hash = Set(password::hash(&password_input)?);
            active.is_reset_password = Set(true);
        }

        self.user_store.update(id, active).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), InternalError> {
        self.user_store.delete(id).await
    }
}
