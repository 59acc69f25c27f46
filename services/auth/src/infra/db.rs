use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use tats_auth_schema::{
    accounts, outbox_events, password_reset_tokens, two_factor_confirmations, users,
    verification_tokens,
};

use crate::domain::repository::{
    AccountRepository, EmailTokenRepository, OutboxRepository, TwoFactorConfirmationRepository,
    UserRepository,
};
use crate::domain::types::{
    AuthUser, EmailToken, OauthAccount, OutboxEvent, TwoFactorConfirmation,
};
use crate::error::AuthServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            email_verified: Set(user.email_verified),
            role: Set(user.role as i16),
            two_factor_enabled: Set(user.two_factor_enabled),
            image: Set(user.image.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn set_email_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            email_verified: Set(Some(at)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set email verified")?;
        Ok(())
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(hash.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set password hash")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<(), AuthServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(new_name) = name {
            am.name = Set(new_name.to_owned());
        }
        if let Some(new_image) = image {
            am.image = Set(Some(new_image.to_owned()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn set_two_factor_enabled(
        &self,
        id: Uuid,
        enabled: bool,
    ) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            two_factor_enabled: Set(enabled),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set two-factor enabled")?;
        Ok(())
    }

    async fn change_email(&self, id: Uuid, email: &str) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            email: Set(email.to_owned()),
            email_verified: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("change user email")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> AuthUser {
    AuthUser {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        email_verified: model.email_verified,
        role: model.role as u8,
        two_factor_enabled: model.two_factor_enabled,
        image: model.image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Verification token repository ────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationTokenRepository {
    pub db: DatabaseConnection,
}

impl EmailTokenRepository for DbVerificationTokenRepository {
    async fn replace_for_email(
        &self,
        token: &EmailToken,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let token = token.clone();
                let event = event.clone();
                Box::pin(async move {
                    verification_tokens::Entity::delete_many()
                        .filter(verification_tokens::Column::Email.eq(token.email.clone()))
                        .exec(txn)
                        .await?;
                    verification_tokens::ActiveModel {
                        id: Set(token.id),
                        email: Set(token.email.clone()),
                        token: Set(token.token.clone()),
                        expires_at: Set(token.expires_at),
                        created_at: Set(token.created_at),
                    }
                    .insert(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("replace verification token")?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<EmailToken>, AuthServiceError> {
        let model = verification_tokens::Entity::find()
            .filter(verification_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find verification token")?;
        Ok(model.map(|m| EmailToken {
            id: m.id,
            email: m.email,
            token: m.token,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        verification_tokens::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete verification token")?;
        Ok(())
    }
}

// ── Password reset token repository ──────────────────────────────────────────

#[derive(Clone)]
pub struct DbPasswordResetTokenRepository {
    pub db: DatabaseConnection,
}

impl EmailTokenRepository for DbPasswordResetTokenRepository {
    async fn replace_for_email(
        &self,
        token: &EmailToken,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let token = token.clone();
                let event = event.clone();
                Box::pin(async move {
                    password_reset_tokens::Entity::delete_many()
                        .filter(password_reset_tokens::Column::Email.eq(token.email.clone()))
                        .exec(txn)
                        .await?;
                    password_reset_tokens::ActiveModel {
                        id: Set(token.id),
                        email: Set(token.email.clone()),
                        token: Set(token.token.clone()),
                        expires_at: Set(token.expires_at),
                        created_at: Set(token.created_at),
                    }
                    .insert(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("replace password reset token")?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<EmailToken>, AuthServiceError> {
        let model = password_reset_tokens::Entity::find()
            .filter(password_reset_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find password reset token")?;
        Ok(model.map(|m| EmailToken {
            id: m.id,
            email: m.email,
            token: m.token,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        password_reset_tokens::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete password reset token")?;
        Ok(())
    }
}

// ── Two-factor confirmation repository ───────────────────────────────────────

#[derive(Clone)]
pub struct DbTwoFactorConfirmationRepository {
    pub db: DatabaseConnection,
}

impl TwoFactorConfirmationRepository for DbTwoFactorConfirmationRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TwoFactorConfirmation>, AuthServiceError> {
        let model = two_factor_confirmations::Entity::find()
            .filter(two_factor_confirmations::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find two-factor confirmation")?;
        Ok(model.map(|m| TwoFactorConfirmation {
            id: m.id,
            user_id: m.user_id,
            created_at: m.created_at,
        }))
    }

    async fn create(&self, user_id: Uuid) -> Result<TwoFactorConfirmation, AuthServiceError> {
        let confirmation = TwoFactorConfirmation {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };
        two_factor_confirmations::ActiveModel {
            id: Set(confirmation.id),
            user_id: Set(confirmation.user_id),
            created_at: Set(confirmation.created_at),
        }
        .insert(&self.db)
        .await
        .context("create two-factor confirmation")?;
        Ok(confirmation)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        two_factor_confirmations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete two-factor confirmation")?;
        Ok(())
    }
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_provider(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<OauthAccount>, AuthServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Provider.eq(provider))
            .filter(accounts::Column::ProviderAccountId.eq(provider_account_id))
            .one(&self.db)
            .await
            .context("find account by provider")?;
        Ok(model.map(|m| OauthAccount {
            id: m.id,
            user_id: m.user_id,
            provider: m.provider,
            provider_account_id: m.provider_account_id,
            created_at: m.created_at,
        }))
    }

    async fn create(&self, account: &OauthAccount) -> Result<(), AuthServiceError> {
        accounts::ActiveModel {
            id: Set(account.id),
            user_id: Set(account.user_id),
            provider: Set(account.provider.clone()),
            provider_account_id: Set(account.provider_account_id.clone()),
            created_at: Set(account.created_at),
        }
        .insert(&self.db)
        .await
        .context("create account")?;
        Ok(())
    }
}

// ── Outbox repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOutboxRepository {
    pub db: DatabaseConnection,
}

impl OutboxRepository for DbOutboxRepository {
    async fn enqueue(&self, event: &OutboxEvent) -> Result<(), AuthServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move { insert_outbox_event(txn, &event).await })
            })
            .await
            .context("enqueue outbox event")?;
        Ok(())
    }
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}
