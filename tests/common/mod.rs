use std::sync::Arc;

use admin_console_backend::config::{
    ApplicationSettings, DatabaseSettings, JwtSettings, ServerSettings,
};
use admin_console_backend::services::{AdminService, AuthService, UserService};
use admin_console_backend::stores::{AdminStore, RoleStore, UserStore};
use admin_console_backend::AppData;

pub const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// In-memory database with migrations applied, wrapped in the same shared
/// state the binary builds at startup.
pub async fn test_app_data() -> Arc<AppData> {
    let settings = ApplicationSettings {
        server: ServerSettings { port: 0 },
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
        },
        jwt: JwtSettings {
            secret: TEST_SECRET.to_string(),
            expire_minutes: 15,
        },
    };

    Arc::new(
        AppData::init(settings)
            .await
            .expect("failed to initialize test app data"),
    )
}

pub struct TestServices {
    pub auth: AuthService,
    pub admins: AdminService,
    pub users: UserService,
    pub roles: Arc<RoleStore>,
    pub user_store: Arc<UserStore>,
}

pub fn test_services(app_data: &Arc<AppData>) -> TestServices {
    let admin_store = Arc::new(AdminStore::new(app_data.db.clone()));
    let role_store = Arc::new(RoleStore::new(app_data.db.clone()));
    let user_store = Arc::new(UserStore::new(app_data.db.clone()));

    TestServices {
        auth: AuthService::new(
            Arc::clone(&admin_store),
            Arc::clone(&user_store),
            Arc::clone(&app_data.token_codec),
        ),
        admins: AdminService::new(admin_store, Arc::clone(&role_store)),
        users: UserService::new(Arc::clone(&user_store)),
        roles: role_store,
        user_store,
    }
}
