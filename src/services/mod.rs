// Services layer - flow orchestration over stores
pub mod admin_service;
pub mod auth_service;
pub mod user_service;

pub use admin_service::{AdminChanges, AdminService};
pub use auth_service::AuthService;
pub use user_service::{NewUser, UserChanges, UserService};
