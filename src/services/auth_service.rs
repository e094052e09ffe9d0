use std::sync::Arc;

use chrono::Utc;
use sea_orm::Set;

use crate::auth::{password, TokenCodec};
use crate::errors::InternalError;
use crate::query::{AdminFilter, UserFilter};
use crate::stores::{AdminStore, UserStore};
use crate::types::db::{admin, user};
use crate::types::internal::RoleName;

/// Orchestrates the login and self-service reset flows.
///
/// Returned errors keep "no such principal" and "wrong password" distinct so
/// the API layer can log the difference while presenting one uniform
/// unauthenticated outcome.
pub struct AuthService {
    admin_store: Arc<AdminStore>,
    user_store: Arc<UserStore>,
    token_codec: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(
        admin_store: Arc<AdminStore>,
        user_store: Arc<UserStore>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            admin_store,
            user_store,
            token_codec,
        }
    }

    /// Authenticate an administrator and mint a session token.
    ///
    /// The admin's stored role maps to claim roles by name; a role without a
    /// mapping is a data-integrity error, never a silent default. The
    /// last-login timestamp is persisted before the token is returned - if
    /// that write fails, the whole login fails.
    pub async fn admin_login(
        &self,
        username: &str,
        password_input: &str,
    ) -> Result<String, InternalError> {
        let (admin, role) = self
            .admin_store
            .get(&AdminFilter::by_username(username))
            .await?;

        password::verify(password_input, &admin.password_hash)?;

        let role_name = role
            .as_ref()
            .and_then(|role| RoleName::from_name(&role.name))
            .ok_or_else(|| InternalError::UnmappedRole {
                name: role.map(|role| role.name).unwrap_or_default(),
            })?;

        let token = self.token_codec.encode(admin.id, &[role_name])?;

        self.admin_store
            .update(
                admin.id,
                admin::ActiveModel {
                    last_login_at: Set(Some(Utc::now())),
                    ..Default::default()
                },
            )
            .await?;

        Ok(token)
    }

    /// Authenticate a managed user; same shape as [`Self::admin_login`] but
    /// the role set is fixed, no mapping branch needed.
    pub async fn user_login(
        &self,
        username: &str,
        password_input: &str,
    ) -> Result<String, InternalError> {
        let (user, _admin) = self
            .user_store
            .get(&UserFilter::by_username(username))
            .await?;

        password::verify(password_input, &user.password_hash)?;

        let token = self.token_codec.encode(user.id, &[RoleName::User])?;

        self.user_store
            .update(
                user.id,
                user::ActiveModel {
                    last_login_at: Set(Some(Utc::now())),
                    ..Default::default()
                },
            )
            .await?;

        Ok(token)
    }

    /// Replace the password of the user identified by the caller's own
    /// token subject and clear the must-reset flag.
    ///
    /// The subject always comes from validated claims, never from the
    /// request body; reset is self-service only.
    pub async fn user_reset(&self, subject: i64, new_password: &str) -> Result<(), InternalError> {
        let (user, _admin) = self.user_store.get(&UserFilter::by_id(subject)).await?;

        let password_hash = password::hash(new_password)?;

        self.user_store
            .update(
                user.id,
                user::ActiveModel {
                    password_hash: Set(password_hash),
                    is_reset_password: Set(false),
                    update_at: Set(Utc::now()),
                    ..Default::default()
                },
            )
            .await
    }
}
