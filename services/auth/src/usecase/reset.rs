use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::{EmailTokenRepository, OutboxRepository, UserRepository};
use crate::domain::types::{
    EmailToken, OutboxEvent, PASSWORD_RESET_TOKEN_TTL_SECS, normalize_email, valid_email,
    valid_password,
};
use crate::error::AuthServiceError;
use crate::usecase::password::hash_password;
use crate::usecase::verification::generate_token;

/// Build a fresh reset token and the outbox event that emails it.
pub fn new_reset_token(email: &str) -> (EmailToken, OutboxEvent) {
    let now = Utc::now();
    let token = EmailToken {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        token: generate_token(),
        expires_at: now + Duration::seconds(PASSWORD_RESET_TOKEN_TTL_SECS),
        created_at: now,
    };
    let event = OutboxEvent {
        id: Uuid::new_v4(),
        kind: "password_reset_requested".to_owned(),
        payload: json!({ "email": email, "token": token.token }),
        idempotency_key: format!("password_reset_requested:{}", token.id),
    };
    (token, event)
}

// ── RequestPasswordReset ─────────────────────────────────────────────────────

pub struct RequestPasswordResetUseCase<U, R>
where
    U: UserRepository,
    R: EmailTokenRepository,
{
    pub users: U,
    pub reset_tokens: R,
}

impl<U, R> RequestPasswordResetUseCase<U, R>
where
    U: UserRepository,
    R: EmailTokenRepository,
{
    /// Issue a reset token for a known credential account.
    ///
    /// Unknown emails and OAuth-only accounts (nothing to reset) are silently
    /// ignored; the endpoint always looks the same from outside.
    pub async fn execute(&self, email: &str) -> Result<(), AuthServiceError> {
        let email = normalize_email(email);
        if !valid_email(&email) {
            return Ok(());
        }
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(());
        };
        if user.password_hash.is_none() {
            return Ok(());
        }

        let (token, event) = new_reset_token(&email);
        self.reset_tokens.replace_for_email(&token, &event).await
    }
}

// ── ConfirmPasswordReset ─────────────────────────────────────────────────────

pub struct ConfirmPasswordResetUseCase<U, R, O>
where
    U: UserRepository,
    R: EmailTokenRepository,
    O: OutboxRepository,
{
    pub users: U,
    pub reset_tokens: R,
    pub outbox: O,
}

impl<U, R, O> ConfirmPasswordResetUseCase<U, R, O>
where
    U: UserRepository,
    R: EmailTokenRepository,
    O: OutboxRepository,
{
    /// Spend a reset token: re-resolve the user by the token's stored email,
    /// persist the new password hash, delete the row and queue the
    /// password-changed notice.
    pub async fn execute(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthServiceError::MissingData);
        }
        if !valid_password(new_password) {
            return Err(AuthServiceError::WeakPassword);
        }

        let record = self
            .reset_tokens
            .find_by_token(token)
            .await?
            .ok_or(AuthServiceError::TokenNotFound)?;

        if record.is_expired() {
            self.reset_tokens.delete(record.id).await?;
            return Err(AuthServiceError::TokenExpired);
        }

        let user = self
            .users
            .find_by_email(&record.email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let hash = hash_password(new_password)?;
        self.users.set_password_hash(user.id, &hash).await?;
        self.reset_tokens.delete(record.id).await?;

        self.outbox
            .enqueue(&OutboxEvent {
                id: Uuid::new_v4(),
                kind: "password_changed".to_owned(),
                payload: json!({ "email": record.email }),
                idempotency_key: format!("password_changed:{}", record.id),
            })
            .await
    }
}
