mod common;

use std::sync::Arc;

use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::json;

use admin_console_backend::api;
use admin_console_backend::services::NewUser;
use admin_console_backend::types::internal::RoleName;
use admin_console_backend::AppData;

use common::{test_app_data, test_services, TestServices};

/// App data with one super admin ("root") already seeded.
async fn seeded_app() -> (Arc<AppData>, TestServices) {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);

    let role = services
        .roles
        .find_or_create(RoleName::SuperAdmin.as_str())
        .await
        .expect("seed role");
    services
        .admins
        .create(role.id, "root", "admin-password")
        .await
        .expect("seed admin");

    (app_data, services)
}

async fn seed_user(services: &TestServices, username: &str, phone: &str) {
    services
        .users
        .create(
            1,
            NewUser {
                username: username.to_string(),
                password: "user-password".to_string(),
                name: username.to_string(),
                phone: phone.to_string(),
            },
        )
        .await
        .expect("seed user");
}

async fn login(
    client: &TestClient<impl poem::Endpoint>,
    path: &str,
    username: &str,
    password: &str,
) -> String {
    let resp = client
        .post(path)
        .body_json(&json!({ "username": username, "password": password }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.json().await;
    body.value()
        .object()
        .get("access_token")
        .string()
        .to_string()
}

#[tokio::test]
async fn login_failure_is_uniform_for_unknown_user_and_wrong_password() {
    let (app_data, _services) = seeded_app().await;
    let client = TestClient::new(api::routes(app_data));

    let unknown = client
        .post("/auth/admin/login")
        .body_json(&json!({ "username": "nobody", "password": "admin-password" }))
        .send()
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);

    let mismatch = client
        .post("/auth/admin/login")
        .body_json(&json!({ "username": "root", "password": "wrong" }))
        .send()
        .await;
    mismatch.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_scope_is_gated_by_token_and_role() {
    let (app_data, services) = seeded_app().await;
    let client = TestClient::new(api::routes(app_data));
    let admin_token = login(&client, "/auth/admin/login", "root", "admin-password").await;

    // No token: rejected before any handler runs.
    let resp = client.get("/admin/admins").query("limit", &10).send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    // USER-role token on a SUPER_ADMIN scope: authenticated but forbidden.
    seed_user(&services, "jane", "+15550000001").await;
    let user_token = login(&client, "/auth/login", "jane", "user-password").await;
    let resp = client
        .get("/admin/admins")
        .query("limit", &10)
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    // Super-admin token: full list with pagination and sort echo.
    let resp = client
        .get("/admin/admins")
        .query("limit", &10)
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.json().await;
    let body = body.value().object();
    assert_eq!(body.get("admins").array().len(), 1);
    let pagination = body.get("pagination").object();
    assert_eq!(pagination.get("record_count").i64(), 1);
    assert_eq!(pagination.get("total").i64(), 1);
    let sort_order = body.get("sort_order").object();
    assert_eq!(sort_order.get("sort").string(), "id");
    assert_eq!(sort_order.get("order").string(), "asc");
}

#[tokio::test]
async fn invalid_sort_and_pagination_are_rejected_up_front() {
    let (app_data, _services) = seeded_app().await;
    let client = TestClient::new(api::routes(app_data));
    let token = login(&client, "/auth/admin/login", "root", "admin-password").await;

    // Real column, but not in the sortable allow-list.
    let resp = client
        .get("/admin/admins")
        .query("limit", &10)
        .query("sort", &"password_hash")
        .query("order", &"asc")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = client
        .get("/admin/admins")
        .query("limit", &10)
        .query("sort", &"id")
        .query("order", &"sideways")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = client
        .get("/admin/admins")
        .query("limit", &0)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = client
        .get("/admin/admins")
        .query("limit", &2000)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_only_ever_touches_the_token_subject() {
    let (app_data, services) = seeded_app().await;
    let client = TestClient::new(api::routes(app_data));

    seed_user(&services, "jane", "+15550000001").await;
    seed_user(&services, "mallory", "+15550000002").await;

    let jane_token = login(&client, "/auth/login", "jane", "user-password").await;

    // A client-supplied id in the body has no effect; only the subject of
    // the presented token is reset.
    let resp = client
        .patch("/account/reset")
        .header("Authorization", format!("Bearer {}", jane_token))
        .body_json(&json!({ "password": "chosen-password", "id": 2 }))
        .send()
        .await;
    resp.assert_status_is_ok();

    login(&client, "/auth/login", "jane", "chosen-password").await;
    login(&client, "/auth/login", "mallory", "user-password").await;
}

#[tokio::test]
async fn account_scope_rejects_admin_tokens() {
    let (app_data, services) = seeded_app().await;
    let client = TestClient::new(api::routes(app_data));
    let admin_token = login(&client, "/auth/admin/login", "root", "admin-password").await;

    let resp = client
        .get("/account/profile")
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    seed_user(&services, "jane", "+15550000001").await;
    let user_token = login(&client, "/auth/login", "jane", "user-password").await;

    let resp = client
        .get("/account/profile")
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.json().await;
    let body = body.value().object();
    assert_eq!(body.get("username").string(), "jane");
    assert_eq!(body.get("admin").object().get("username").string(), "root");
}

#[tokio::test]
async fn created_users_are_owned_by_the_calling_admin() {
    let (app_data, _services) = seeded_app().await;
    let client = TestClient::new(api::routes(app_data));
    let admin_token = login(&client, "/auth/admin/login", "root", "admin-password").await;

    let resp = client
        .post("/admin/users")
        .header("Authorization", format!("Bearer {}", admin_token))
        .body_json(&json!({
            "username": "jane",
            "password": "user-password",
            "name": "Jane Doe",
            "phone": "+15550000001",
            // Ownership is not part of the request schema; this is ignored.
            "admin_id": 999
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);

    let body = resp.json().await;
    let body = body.value().object();
    assert_eq!(body.get("admin_id").i64(), 1);
    assert!(body.get("is_reset_password").bool());
}

#[tokio::test]
async fn bootstrap_endpoint_is_one_time() {
    let app_data = test_app_data().await;
    let client = TestClient::new(api::routes(app_data));

    let resp = client.post("/auth/initial").send().await;
    resp.assert_status(StatusCode::CREATED);

    login(&client, "/auth/admin/login", "superadmin", "superadmin").await;

    let resp = client.post("/auth/initial").send().await;
    resp.assert_status(StatusCode::CONFLICT);
}
