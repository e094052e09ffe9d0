use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::auth::claim_subject;
use crate::errors::ApiError;
use crate::query::{AdminFilter, Pagination};
use crate::services::{AdminChanges, AdminService};
use crate::types::dto::admin::{
    AdminCreatedResponse, AdminListResponse, AdminRecord, CreateAdminRequest, UpdateAdminRequest,
};
use crate::types::dto::common::CompletedResponse;

use super::{parse_filter_time, sort_order_from_params};

/// Fields administrators may sort by, besides the id natural key.
const SORTABLE_FIELDS: &[&str] = &["username", "create_at", "last_login_at"];

/// Administrator CRUD, super-admin scope.
pub struct AdminApi {
    admin_service: Arc<AdminService>,
}

impl AdminApi {
    pub fn new(admin_service: Arc<AdminService>) -> Self {
        Self { admin_service }
    }
}

#[derive(Tags)]
enum AdminTags {
    /// Administrator management
    Administrators,
}

#[OpenApi]
impl AdminApi {
    /// List administrators with filtering, sorting and pagination
    #[oai(path = "/admins", method = "get", tag = "AdminTags::Administrators")]
    #[allow(clippy::too_many_arguments)]
    async fn list_admins(
        &self,
        role_id: Query<Option<i64>>,
        username: Query<Option<String>>,
        create_at_after: Query<Option<String>>,
        create_at_before: Query<Option<String>>,
        sort: Query<Option<String>>,
        order: Query<Option<String>>,
        limit: Query<u64>,
        offset: Query<Option<u64>>,
    ) -> Result<Json<AdminListResponse>, ApiError> {
        let sort_order = sort_order_from_params(sort.0, order.0);
        if !sort_order.validate(SORTABLE_FIELDS) {
            return Err(ApiError::validation("invalid sort order"));
        }

        let mut pagination = Pagination::new(limit.0, offset.0.unwrap_or(0))?;

        let filter = AdminFilter {
            id: None,
            role_id: role_id.0,
            username: username.0,
            create_at_after: parse_filter_time(create_at_after.0, "create_at_after")?,
            create_at_before: parse_filter_time(create_at_before.0, "create_at_before")?,
        };

        let admins = self
            .admin_service
            .get_all(&filter, &sort_order, Some(&mut pagination))
            .await?;

        Ok(Json(AdminListResponse {
            admins: admins
                .into_iter()
                .map(|(admin, role)| AdminRecord::from_model(admin, role))
                .collect(),
            pagination: pagination.into(),
            sort_order: sort_order.into(),
        }))
    }

    /// Create an administrator
    #[oai(path = "/admins", method = "post", tag = "AdminTags::Administrators")]
    async fn create_admin(
        &self,
        body: Json<CreateAdminRequest>,
    ) -> Result<AdminCreatedResponse, ApiError> {
        let admin = self
            .admin_service
            .create(body.0.role_id, &body.0.username, &body.0.password)
            .await?;

        Ok(AdminCreatedResponse::Created(Json(
            AdminRecord::from_model(admin, None),
        )))
    }

    /// Fetch a single administrator by id
    #[oai(path = "/admins/:id", method = "get", tag = "AdminTags::Administrators")]
    async fn get_admin(&self, id: Path<i64>) -> Result<Json<AdminRecord>, ApiError> {
        let (admin, role) = self.admin_service.get(&AdminFilter::by_id(id.0)).await?;
        Ok(Json(AdminRecord::from_model(admin, role)))
    }

    /// Partially update an administrator
    #[oai(path = "/admins/:id", method = "patch", tag = "AdminTags::Administrators")]
    async fn update_admin(
        &self,
        id: Path<i64>,
        body: Json<UpdateAdminRequest>,
    ) -> Result<CompletedResponse, ApiError> {
        self.admin_service
            .update(
                id.0,
                AdminChanges {
                    role_id: body.0.role_id,
                    username: body.0.username,
                    password: body.0.password,
                },
            )
            .await?;

        Ok(CompletedResponse::Ok)
    }

    /// Soft-delete an administrator
    #[oai(path = "/admins/:id", method = "delete", tag = "AdminTags::Administrators")]
    async fn delete_admin(&self, id: Path<i64>) -> Result<CompletedResponse, ApiError> {
        self.admin_service.delete(id.0).await?;
        Ok(CompletedResponse::Ok)
    }

    /// Fetch the calling administrator's own record
    #[oai(path = "/profile", method = "get", tag = "AdminTags::Administrators")]
    async fn admin_profile(&self, req: &Request) -> Result<Json<AdminRecord>, ApiError> {
        let subject = claim_subject(req)?;

        let (admin, role) = self.admin_service.get(&AdminFilter::by_id(subject)).await?;
        Ok(Json(AdminRecord::from_model(admin, role)))
    }
}
