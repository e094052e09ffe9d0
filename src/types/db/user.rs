use sea_orm::entity::prelude::*;

/// Managed user account, always owned by an administrator.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub admin_id: i64,
    pub create_at: DateTimeUtc,
    pub update_at: DateTimeUtc,
    pub delete_at: Option<DateTimeUtc>,
    pub last_login_at: Option<DateTimeUtc>,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub name: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub is_reset_password: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::AdminId",
        to = "super::admin::Column::Id"
    )]
    Admin,
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
