use chrono::{DateTime, Utc};
use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::{admin, user};

use super::admin::AdminRecord;
use super::common::{PaginationMeta, SortOrderMeta};

/// Managed user record as exposed over the API.
#[derive(Object, Debug)]
pub struct UserRecord {
    pub id: i64,
    pub admin_id: i64,
    /// Owning administrator, joined eagerly
    pub admin: Option<AdminRecord>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub username: String,
    pub name: String,
    pub phone: String,
    pub is_reset_password: bool,
}

impl UserRecord {
    pub fn from_model(user: user::Model, admin: Option<admin::Model>) -> Self {
        Self {
            id: user.id,
            admin_id: user.admin_id,
            admin: admin.map(|admin| AdminRecord::from_model(admin, None)),
            create_at: user.create_at,
            update_at: user.update_at,
            last_login_at: user.last_login_at,
            username: user.username,
            name: user.name,
            phone: user.phone,
            is_reset_password: user.is_reset_password,
        }
    }
}

#[derive(Object, Debug)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

#[derive(Object, Debug)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(ApiResponse, Debug)]
pub enum UserCreatedResponse {
    #[oai(status = 201)]
    Created(Json<UserRecord>),
}

#[derive(Object, Debug)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
    pub pagination: PaginationMeta,
    pub sort_order: SortOrderMeta,
}
