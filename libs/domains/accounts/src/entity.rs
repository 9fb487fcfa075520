use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Account, AccountRole};

/// Sea-ORM Entity for the accounts table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        let roles = model
            .roles
            .iter()
            .filter_map(|r| r.parse::<AccountRole>().ok())
            .collect();

        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            roles,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Account> for ActiveModel {
    fn from(account: Account) -> Self {
        let roles = account.role_names();
        ActiveModel {
            id: Set(account.id),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            roles: Set(roles),
            created_at: Set(account.created_at.into()),
            updated_at: Set(account.updated_at.into()),
        }
    }
}
