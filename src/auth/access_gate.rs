//! Authenticate-then-authorize middleware pair guarding protected routes.
//!
//! `TokenAuth` decodes the bearer token and attaches the verified [`Claims`]
//! to the request extensions; `RoleGuard` checks the attached claims against
//! an expected role set. The two compose independently but `RoleGuard` must
//! always run after `TokenAuth`. Neither touches persistence.

use std::sync::Arc;

use poem::http::{header, StatusCode};
use poem::{Endpoint, Middleware, Request, Result};

use crate::auth::TokenCodec;
use crate::errors::ApiError;
use crate::types::internal::{Claims, RoleName};

fn unauthenticated() -> poem::Error {
    poem::Error::from_status(StatusCode::UNAUTHORIZED)
}

/// Bearer-token authentication middleware.
pub struct TokenAuth {
    codec: Arc<TokenCodec>,
}

impl TokenAuth {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<E: Endpoint> Middleware<E> for TokenAuth {
    type Output = TokenAuthEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TokenAuthEndpoint {
            ep,
            codec: Arc::clone(&self.codec),
        }
    }
}

pub struct TokenAuthEndpoint<E> {
    ep: E,
    codec: Arc<TokenCodec>,
}

impl<E: Endpoint> Endpoint for TokenAuthEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(unauthenticated)?;

        // Every decode failure collapses into the same opaque 401; the
        // reason is never disclosed to the caller.
        let claims = self
            .codec
            .decode(token)
            .map_err(|_| unauthenticated())?;

        req.extensions_mut().insert(claims);
        self.ep.call(req).await
    }
}

/// Role-check middleware; must run after [`TokenAuth`].
pub struct RoleGuard {
    expected: Vec<RoleName>,
}

impl RoleGuard {
    pub fn new(expected: impl Into<Vec<RoleName>>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl<E: Endpoint> Middleware<E> for RoleGuard {
    type Output = RoleGuardEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RoleGuardEndpoint {
            ep,
            expected: self.expected.clone(),
        }
    }
}

pub struct RoleGuardEndpoint<E> {
    ep: E,
    expected: Vec<RoleName>,
}

impl<E: Endpoint> Endpoint for RoleGuardEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        // Absent claims means the authenticate step never ran: a wiring
        // mistake, reported as unauthenticated rather than a server error.
        let claims = req
            .extensions()
            .get::<Claims>()
            .ok_or_else(unauthenticated)?;

        let permitted = self
            .expected
            .iter()
            .any(|expected| claims.roles.contains(expected));
        if !permitted {
            return Err(poem::Error::from_status(StatusCode::FORBIDDEN));
        }

        self.ep.call(req).await
    }
}

/// Read the numeric subject id out of the claims attached by [`TokenAuth`].
pub fn claim_subject(req: &Request) -> Result<i64, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(ApiError::unauthenticated)?;

    claims.sub.parse().map_err(|_| {
        tracing::error!(sub = %claims.sub, "claim subject is not a numeric id");
        ApiError::internal()
    })
}
