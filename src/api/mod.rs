// API layer - HTTP endpoints and route assembly
pub mod account;
pub mod admin;
pub mod auth;
pub mod user;

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use poem::middleware::Cors;
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

pub use account::AccountApi;
pub use admin::AdminApi;
pub use auth::AuthApi;
pub use user::UserAdminApi;

use crate::app_data::AppData;
use crate::auth::{RoleGuard, TokenAuth};
use crate::errors::ApiError;
use crate::query::SortOrder;
use crate::services::{AdminService, AuthService, UserService};
use crate::stores::{AdminStore, RoleStore, UserStore};
use crate::types::internal::RoleName;

/// Timestamp format accepted by the create_at_after / create_at_before
/// filter parameters.
const FILTER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn parse_filter_time(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => NaiveDateTime::parse_from_str(&raw, FILTER_TIME_FORMAT)
            .map(|naive| Some(naive.and_utc()))
            .map_err(|_| ApiError::validation(format!("invalid {} timestamp", field))),
    }
}

/// Start from the natural-key default and override with whatever the client
/// supplied; validation happens at the call site against the entity's
/// allow-list.
pub(crate) fn sort_order_from_params(sort: Option<String>, order: Option<String>) -> SortOrder {
    let mut sort_order = SortOrder::initial();
    if let Some(sort) = sort {
        sort_order.sort = sort;
    }
    if let Some(order) = order {
        sort_order.order = order;
    }
    sort_order
}

/// Wire stores, services and endpoint groups into the application routes.
///
/// Three scopes with different gates:
/// - `/auth` - public: logins and the one-time bootstrap
/// - `/account` - authenticated USER: self-service reset and own profile
/// - `/admin` - authenticated SUPER_ADMIN: admin/user CRUD and own profile
pub fn routes(app_data: Arc<AppData>) -> impl Endpoint {
    let admin_store = Arc::new(AdminStore::new(app_data.db.clone()));
    let role_store = Arc::new(RoleStore::new(app_data.db.clone()));
    let user_store = Arc::new(UserStore::new(app_data.db.clone()));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&admin_store),
        Arc::clone(&user_store),
        Arc::clone(&app_data.token_codec),
    ));
    let admin_service = Arc::new(AdminService::new(admin_store, role_store));
    let user_service = Arc::new(UserService::new(user_store));

    let public_api = OpenApiService::new(
        AuthApi::new(Arc::clone(&auth_service), Arc::clone(&admin_service)),
        "Admin Console - Auth",
        env!("CARGO_PKG_VERSION"),
    );
    let swagger_ui = public_api.swagger_ui();

    let account_api = OpenApiService::new(
        AccountApi::new(Arc::clone(&auth_service), Arc::clone(&user_service)),
        "Admin Console - Account",
        env!("CARGO_PKG_VERSION"),
    );

    let admin_api = OpenApiService::new(
        (
            AdminApi::new(Arc::clone(&admin_service)),
            UserAdminApi::new(Arc::clone(&user_service)),
        ),
        "Admin Console - Administration",
        env!("CARGO_PKG_VERSION"),
    );

    Route::new()
        .nest("/auth", public_api)
        .nest(
            "/account",
            account_api
                .with(RoleGuard::new([RoleName::User]))
                .with(TokenAuth::new(Arc::clone(&app_data.token_codec))),
        )
        .nest(
            "/admin",
            admin_api
                .with(RoleGuard::new([RoleName::SuperAdmin]))
                .with(TokenAuth::new(Arc::clone(&app_data.token_codec))),
        )
        .nest("/swagger", swagger_ui)
        .with(Cors::new())
}
