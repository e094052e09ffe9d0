use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::auth::claim_subject;
use crate::errors::ApiError;
use crate::query::{Pagination, UserFilter};
use crate::services::{NewUser, UserChanges, UserService};
use crate::types::dto::common::CompletedResponse;
use crate::types::dto::user::{
    CreateUserRequest, UpdateUserRequest, UserCreatedResponse, UserListResponse, UserRecord,
};

use super::{parse_filter_time, sort_order_from_params};

const SORTABLE_FIELDS: &[&str] = &["username", "name", "create_at", "last_login_at"];

/// Managed-user CRUD, super-admin scope.
pub struct UserAdminApi {
    user_service: Arc<UserService>,
}

impl UserAdminApi {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }
}

#[derive(Tags)]
enum UserTags {
    /// Managed user administration
    Users,
}

#[OpenApi]
impl UserAdminApi {
    /// List managed users with filtering, sorting and pagination
    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    #[allow(clippy::too_many_arguments)]
    async fn list_users(
        &self,
        admin_id: Query<Option<i64>>,
        username: Query<Option<String>>,
        name: Query<Option<String>>,
        phone: Query<Option<String>>,
        is_reset_password: Query<Option<bool>>,
        create_at_after: Query<Option<String>>,
        create_at_before: Query<Option<String>>,
        search: Query<Option<String>>,
        sort: Query<Option<String>>,
        order: Query<Option<String>>,
        limit: Query<u64>,
        offset: Query<Option<u64>>,
    ) -> Result<Json<UserListResponse>, ApiError> {
        let sort_order = sort_order_from_params(sort.0, order.0);
        if !sort_order.validate(SORTABLE_FIELDS) {
            return Err(ApiError::validation("invalid sort order"));
        }

        let mut pagination = Pagination::new(limit.0, offset.0.unwrap_or(0))?;

        let filter = UserFilter {
            id: None,
            admin_id: admin_id.0,
            username: username.0,
            name: name.0,
            phone: phone.0,
            is_reset_password: is_reset_password.0,
            create_at_after: parse_filter_time(create_at_after.0, "create_at_after")?,
            create_at_before: parse_filter_time(create_at_before.0, "create_at_before")?,
            search: search.0,
        };

        let users = self
            .user_service
            .get_all(&filter, &sort_order, Some(&mut pagination))
            .await?;

        Ok(Json(UserListResponse {
            users: users
                .into_iter()
                .map(|(user, admin)| UserRecord::from_model(user, admin))
                .collect(),
            pagination: pagination.into(),
            sort_order: sort_order.into(),
        }))
    }

    /// Create a managed user owned by the calling administrator
    #[oai(path = "/users", method = "post", tag = "UserTags::Users")]
    async fn create_user(
        &self,
        req: &Request,
        body: Json<CreateUserRequest>,
    ) -> Result<UserCreatedResponse, ApiError> {
        // Ownership comes from the caller's claims, not the body.
        let owner_admin_id = claim_subject(req)?;

        let user = self
            .user_service
            .create(
                owner_admin_id,
                NewUser {
                    username: body.0.username,
                    password: body.0.password,
                    name: body.0.name,
                    phone: body.0.phone,
                },
            )
            .await?;

        Ok(UserCreatedResponse::Created(Json(UserRecord::from_model(
            user, None,
        ))))
    }

    /// Fetch a single managed user by id
    #[oai(path = "/users/:id", method = "get", tag = "UserTags::Users")]
    async fn get_user(&self, id: Path<i64>) -> Result<Json<UserRecord>, ApiError> {
        let (user, admin) = self.user_service.get(&UserFilter::by_id(id.0)).await?;
        Ok(Json(UserRecord::from_model(user, admin)))
    }

    /// Partially update a managed user
    #[oai(path = "/users/:id", method = "patch", tag = "UserTags::Users")]
    async fn update_user(
        &self,
        id: Path<i64>,
        body: Json<UpdateUserRequest>,
    ) -> Result<CompletedResponse, ApiError> {
        self.user_service
            .update(
                id.0,
                UserChanges {
                    username: body.0.username,
                    password: body.0.password,
                    name: body.0.name,
                    phone: body.0.phone,
                },
            )
            .await?;

        Ok(CompletedResponse::Ok)
    }

    /// Soft-delete a managed user
    #[oai(path = "/users/:id", method = "delete", tag = "UserTags::Users")]
    async fn delete_user(&self, id: Path<i64>) -> Result<CompletedResponse, ApiError> {
        self.user_service.delete(id.0).await?;
        Ok(CompletedResponse::Ok)
    }
}
