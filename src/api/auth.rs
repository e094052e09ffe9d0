use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::{ApiError, InternalError};
use crate::services::{AdminService, AuthService};
use crate::types::dto::auth::{AccessTokenResponse, InitialResponse, LoginRequest};

/// Public authentication endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
    admin_service: Arc<AdminService>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>, admin_service: Arc<AdminService>) -> Self {
        Self {
            auth_service,
            admin_service,
        }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Administrator login
    #[oai(path = "/admin/login", method = "post", tag = "AuthTags::Authentication")]
    async fn admin_login(
        &self,
        body: Json<LoginRequest>,
    ) -> Result<Json<AccessTokenResponse>, ApiError> {
        let access_token = self
            .auth_service
            .admin_login(&body.username, &body.password)
            .await
            .map_err(login_failure)?;

        Ok(Json(AccessTokenResponse { access_token }))
    }

    /// Managed user login
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn user_login(
        &self,
        body: Json<LoginRequest>,
    ) -> Result<Json<AccessTokenResponse>, ApiError> {
        let access_token = self
            .auth_service
            .user_login(&body.username, &body.password)
            .await
            .map_err(login_failure)?;

        Ok(Json(AccessTokenResponse { access_token }))
    }

    /// One-time bootstrap: seed the super-admin role and account
    #[oai(path = "/initial", method = "post", tag = "AuthTags::Authentication")]
    async fn initial(&self) -> Result<InitialResponse, ApiError> {
        self.admin_service.initial().await?;
        Ok(InitialResponse::Created)
    }
}

/// Collapse login failures into one uniform unauthenticated outcome.
///
/// Unknown username and wrong password stay distinguishable internally for
/// logging but must be indistinguishable to the caller to prevent user
/// enumeration.
fn login_failure(err: InternalError) -> ApiError {
    match err {
        InternalError::NotFound { .. } => {
            tracing::info!("login rejected: unknown username");
            ApiError::invalid_credentials()
        }
        InternalError::InvalidCredentials => {
            tracing::info!("login rejected: password mismatch");
            ApiError::invalid_credentials()
        }
        other => ApiError::from(other),
    }
}
