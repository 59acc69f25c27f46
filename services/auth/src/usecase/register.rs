use chrono::Utc;
use uuid::Uuid;

use tats_domain::user::UserRole;

use crate::domain::repository::{EmailTokenRepository, UserRepository};
use crate::domain::types::{AuthUser, normalize_email, valid_email, valid_password};
use crate::error::AuthServiceError;
use crate::usecase::password::hash_password;
use crate::usecase::verification::new_verification_token;

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    pub users: U,
    pub verification_tokens: V,
}

impl<U, V> RegisterUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    /// Create an unverified account and queue its first verification email.
    pub async fn execute(&self, input: RegisterInput) -> Result<(), AuthServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthServiceError::MissingData);
        }
        let email = normalize_email(&input.email);
        if !valid_email(&email) {
            return Err(AuthServiceError::InvalidEmail);
        }
        if !valid_password(&input.password) {
            return Err(AuthServiceError::WeakPassword);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }

        let now = Utc::now();
        let user = AuthUser {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            email: email.clone(),
            password_hash: Some(hash_password(&input.password)?),
            email_verified: None,
            role: UserRole::Normal.as_u8(),
            two_factor_enabled: false,
            image: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let (token, event) = new_verification_token(&email);
        self.verification_tokens
            .replace_for_email(&token, &event)
            .await
    }
}
