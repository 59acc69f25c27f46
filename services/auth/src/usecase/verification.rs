use chrono::{Duration, Utc};
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::{EmailTokenRepository, UserRepository};
use crate::domain::types::{
    EmailToken, OutboxEvent, TOKEN_LEN, VERIFICATION_TOKEN_TTL_SECS, normalize_email, valid_email,
};
use crate::error::AuthServiceError;

/// Charset for email tokens (mixed-case alphanumeric, URL-safe).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub(crate) fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Build a fresh verification token and the outbox event that emails it.
/// Issuance through `replace_for_email` supersedes any earlier token.
pub fn new_verification_token(email: &str) -> (EmailToken, OutboxEvent) {
    let now = Utc::now();
    let token = EmailToken {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        token: generate_token(),
        expires_at: now + Duration::seconds(VERIFICATION_TOKEN_TTL_SECS),
        created_at: now,
    };
    let event = OutboxEvent {
        id: Uuid::new_v4(),
        kind: "verification_requested".to_owned(),
        payload: json!({ "email": email, "token": token.token }),
        idempotency_key: format!("verification_requested:{}", token.id),
    };
    (token, event)
}

// ── ResendVerification ───────────────────────────────────────────────────────

pub struct ResendVerificationUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    pub users: U,
    pub verification_tokens: V,
}

impl<U, V> ResendVerificationUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    /// Issue a fresh verification token for a known, still-unverified email.
    /// Unknown or already-verified addresses are silently ignored so the
    /// endpoint cannot be used to probe accounts.
    pub async fn execute(&self, email: &str) -> Result<(), AuthServiceError> {
        let email = normalize_email(email);
        if !valid_email(&email) {
            return Ok(());
        }
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(());
        };
        if user.email_verified.is_some() {
            return Ok(());
        }

        let (token, event) = new_verification_token(&email);
        self.verification_tokens
            .replace_for_email(&token, &event)
            .await
    }
}

// ── ConsumeVerification ──────────────────────────────────────────────────────

pub struct ConsumeVerificationUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    pub users: U,
    pub verification_tokens: V,
}

impl<U, V> ConsumeVerificationUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    /// Exchange an opaque token for the account's verified mark.
    ///
    /// Expired rows are deleted on sight; a second consumption attempt finds
    /// nothing and fails with `TokenNotFound`.
    pub async fn execute(&self, token: &str) -> Result<(), AuthServiceError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthServiceError::MissingData);
        }

        let record = self
            .verification_tokens
            .find_by_token(token)
            .await?
            .ok_or(AuthServiceError::TokenNotFound)?;

        if record.is_expired() {
            self.verification_tokens.delete(record.id).await?;
            return Err(AuthServiceError::TokenExpired);
        }

        let user = self
            .users
            .find_by_email(&record.email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        self.users.set_email_verified(user.id, Utc::now()).await?;
        self.verification_tokens.delete(record.id).await
    }
}
