#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    AuthUser, EmailToken, OauthAccount, OutboxEvent, TwoFactorConfirmation,
};
use crate::error::AuthServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError>;
    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError>;

    /// Stamp the account as verified.
    async fn set_email_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), AuthServiceError>;

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<(), AuthServiceError>;

    async fn set_two_factor_enabled(
        &self,
        id: Uuid,
        enabled: bool,
    ) -> Result<(), AuthServiceError>;

    /// Change the address and clear `email_verified`; the new address must be
    /// re-proven through a fresh verification token.
    async fn change_email(&self, id: Uuid, email: &str) -> Result<(), AuthServiceError>;
}

/// Repository for single-use email tokens (verification and password reset
/// implement the same contract over their own tables).
pub trait EmailTokenRepository: Send + Sync {
    /// Delete any existing token rows for the email and insert the new token
    /// plus its outbox event, all in one transaction. Post-issuance there is
    /// exactly one live token per email.
    async fn replace_for_email(
        &self,
        token: &EmailToken,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<EmailToken>, AuthServiceError>;

    /// Remove a token row (consumption or expiry cleanup).
    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError>;
}

/// Repository for the two-factor gate markers.
pub trait TwoFactorConfirmationRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TwoFactorConfirmation>, AuthServiceError>;

    /// Record a passed challenge. Called by the challenge-verification step,
    /// which lives outside this service; sign-in only ever consumes.
    async fn create(&self, user_id: Uuid) -> Result<TwoFactorConfirmation, AuthServiceError>;

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError>;
}

/// Repository for OAuth provider links.
pub trait AccountRepository: Send + Sync {
    async fn find_by_provider(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<OauthAccount>, AuthServiceError>;

    async fn create(&self, account: &OauthAccount) -> Result<(), AuthServiceError>;
}

/// Outbox writer for events that carry no token row (e.g. change notices).
pub trait OutboxRepository: Send + Sync {
    async fn enqueue(&self, event: &OutboxEvent) -> Result<(), AuthServiceError>;
}
