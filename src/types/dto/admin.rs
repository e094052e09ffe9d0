use chrono::{DateTime, Utc};
use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::{admin, role};

use super::common::{PaginationMeta, SortOrderMeta};

#[derive(Object, Debug)]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,
}

impl From<role::Model> for RoleRecord {
    fn from(role: role::Model) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

/// Administrator record as exposed over the API; the password hash never
/// leaves the persistence layer.
#[derive(Object, Debug)]
pub struct AdminRecord {
    pub id: i64,
    pub role_id: i64,
    pub role: Option<RoleRecord>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub username: String,
}

impl AdminRecord {
    pub fn from_model(admin: admin::Model, role: Option<role::Model>) -> Self {
        Self {
            id: admin.id,
            role_id: admin.role_id,
            role: role.map(RoleRecord::from),
            create_at: admin.create_at,
            update_at: admin.update_at,
            last_login_at: admin.last_login_at,
            username: admin.username,
        }
    }
}

#[derive(Object, Debug)]
pub struct CreateAdminRequest {
    pub role_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Object, Debug)]
pub struct UpdateAdminRequest {
    pub role_id: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(ApiResponse, Debug)]
pub enum AdminCreatedResponse {
    #[oai(status = 201)]
    Created(Json<AdminRecord>),
}

#[derive(Object, Debug)]
pub struct AdminListResponse {
    pub admins: Vec<AdminRecord>,
    pub pagination: PaginationMeta,
    pub sort_order: SortOrderMeta,
}
