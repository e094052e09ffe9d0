pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_roles;
mod m20240301_000002_create_admins;
mod m20240301_000003_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_roles::Migration),
            Box::new(m20240301_000002_create_admins::Migration),
            Box::new(m20240301_000003_create_users::Migration),
        ]
    }
}
