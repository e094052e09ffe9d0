use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::auth::claim_subject;
use crate::errors::ApiError;
use crate::query::UserFilter;
use crate::services::{AuthService, UserService};
use crate::types::dto::auth::ResetRequest;
use crate::types::dto::common::CompletedResponse;
use crate::types::dto::user::UserRecord;

/// Self-service endpoints for an authenticated managed user.
pub struct AccountApi {
    auth_service: Arc<AuthService>,
    user_service: Arc<UserService>,
}

impl AccountApi {
    pub fn new(auth_service: Arc<AuthService>, user_service: Arc<UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }
}

#[derive(Tags)]
enum AccountTags {
    /// Authenticated user self-service
    Account,
}

#[OpenApi]
impl AccountApi {
    /// Replace the caller's own password and clear the must-reset flag.
    ///
    /// The target account is the token subject; any identity supplied in
    /// the body has no representation here and is ignored.
    #[oai(path = "/reset", method = "patch", tag = "AccountTags::Account")]
    async fn reset(
        &self,
        req: &Request,
        body: Json<ResetRequest>,
    ) -> Result<CompletedResponse, ApiError> {
        let subject = claim_subject(req)?;

        self.auth_service.user_reset(subject, &body.password).await?;
        Ok(CompletedResponse::Ok)
    }

    /// Fetch the caller's own record
    #[oai(path = "/profile", method = "get", tag = "AccountTags::Account")]
    async fn profile(&self, req: &Request) -> Result<Json<UserRecord>, ApiError> {
        let subject = claim_subject(req)?;

        let (user, admin) = self.user_service.get(&UserFilter::by_id(subject)).await?;
        Ok(Json(UserRecord::from_model(user, admin)))
    }
}
