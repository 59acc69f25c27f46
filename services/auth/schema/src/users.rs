use sea_orm::entity::prelude::*;

/// Dashboard user account.
///
/// `password_hash` is null for accounts that only ever signed in through an
/// OAuth provider; `email_verified` is null until the verification link is
/// consumed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub email_verified: Option<chrono::DateTime<chrono::Utc>>,
    pub role: i16,
    pub two_factor_enabled: bool,
    pub image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
    #[sea_orm(has_many = "super::two_factor_confirmations::Entity")]
    TwoFactorConfirmations,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::two_factor_confirmations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TwoFactorConfirmations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
