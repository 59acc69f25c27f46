use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full user record as the auth service sees it.
///
/// `password_hash` is `None` for accounts created through an OAuth link;
/// such accounts can never complete a credential sign-in.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
    pub role: u8,
    pub two_factor_enabled: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-use, time-limited token proving control of an email address.
///
/// Verification and password-reset tokens share this shape; they live in
/// separate tables with separate repositories so one can never be spent as
/// the other.
#[derive(Debug, Clone)]
pub struct EmailToken {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl EmailToken {
    /// Wall-clock expiry check. Tokens are short-lived and single-use, so
    /// clock precision is not a concern here.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// One-time marker that a user passed the two-factor challenge.
#[derive(Debug, Clone)]
pub struct TwoFactorConfirmation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// OAuth provider identity linked to a user.
#[derive(Debug, Clone)]
pub struct OauthAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
    pub created_at: DateTime<Utc>,
}

/// Outbox event for async email delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Email token length in characters.
pub const TOKEN_LEN: usize = 48;

/// Verification token time-to-live in seconds (1 hour).
pub const VERIFICATION_TOKEN_TTL_SECS: i64 = 3600;

/// Password-reset token time-to-live in seconds (1 hour).
pub const PASSWORD_RESET_TOKEN_TTL_SECS: i64 = 3600;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Lowercase and trim an email address before any lookup or storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Cheap shape check; real ownership is proven by the verification token.
pub fn valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validate password strength (length only; the dashboard enforces the rest).
pub fn valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
}
