//! Per-entity filter descriptors and their predicate tables.
//!
//! Each filter is a partially-populated projection of its entity: present
//! fields become predicates, absent fields contribute nothing (absence means
//! "don't care", never "must be null"). The predicate kind per field is fixed
//! here at compile time - equality for scalars, strict ranges for the
//! creation-time bounds, and an OR of substring matches for free-text search.
//! Every condition also excludes soft-deleted rows.

use sea_orm::{ColumnTrait, Condition};

use crate::types::db::{admin, user};

pub type FilterTime = chrono::DateTime<chrono::Utc>;

#[derive(Debug, Clone, Default)]
pub struct AdminFilter {
    pub id: Option<i64>,
    pub role_id: Option<i64>,
    pub username: Option<String>,
    pub create_at_after: Option<FilterTime>,
    pub create_at_before: Option<FilterTime>,
}

impl AdminFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(admin::Column::DeleteAt.is_null());

        if let Some(id) = self.id {
            condition = condition.add(admin::Column::Id.eq(id));
        }
        if let Some(role_id) = self.role_id {
            condition = condition.add(admin::Column::RoleId.eq(role_id));
        }
        if let Some(username) = &self.username {
            condition = condition.add(admin::Column::Username.eq(username.as_str()));
        }
        if let Some(after) = self.create_at_after {
            condition = condition.add(admin::Column::CreateAt.gt(after));
        }
        if let Some(before) = self.create_at_before {
            condition = condition.add(admin::Column::CreateAt.lt(before));
        }

        condition
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub admin_id: Option<i64>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_reset_password: Option<bool>,
    pub create_at_after: Option<FilterTime>,
    pub create_at_before: Option<FilterTime>,
    /// Substring match across name and username; the input is bound as a
    /// literal value, wrapped in wildcards by the query builder.
    pub search: Option<String>,
}

impl UserFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(user::Column::DeleteAt.is_null());

        if let Some(id) = self.id {
            condition = condition.add(user::Column::Id.eq(id));
        }
        if let Some(admin_id) = self.admin_id {
            condition = condition.add(user::Column::AdminId.eq(admin_id));
        }
        if let Some(username) = &self.username {
            condition = condition.add(user::Column::Username.eq(username.as_str()));
        }
        if let Some(name) = &self.name {
            condition = condition.add(user::Column::Name.eq(name.as_str()));
        }
        if let Some(phone) = &self.phone {
            condition = condition.add(user::Column::Phone.eq(phone.as_str()));
        }
        if let Some(is_reset_password) = self.is_reset_password {
            condition = condition.add(user::Column::IsResetPassword.eq(is_reset_password));
        }
        if let Some(after) = self.create_at_after {
            condition = condition.add(user::Column::CreateAt.gt(after));
        }
        if let Some(before) = self.create_at_before {
            condition = condition.add(user::Column::CreateAt.lt(before));
        }
        if let Some(search) = &self.search {
            condition = condition.add(
                Condition::any()
                    .add(user::Column::Name.contains(search.as_str()))
                    .add(user::Column::Username.contains(search.as_str())),
            );
        }

        condition
    }
}
