use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_accounts;
mod m20260401_000003_create_verification_tokens;
mod m20260401_000004_create_password_reset_tokens;
mod m20260401_000005_create_two_factor_confirmations;
mod m20260401_000006_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_accounts::Migration),
            Box::new(m20260401_000003_create_verification_tokens::Migration),
            Box::new(m20260401_000004_create_password_reset_tokens::Migration),
            Box::new(m20260401_000005_create_two_factor_confirmations::Migration),
            Box::new(m20260401_000006_create_outbox_events::Migration),
        ]
    }
}
