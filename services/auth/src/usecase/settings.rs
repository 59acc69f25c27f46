use uuid::Uuid;

use crate::domain::repository::{EmailTokenRepository, UserRepository};
use crate::domain::types::{normalize_email, valid_email, valid_password};
use crate::error::AuthServiceError;
use crate::usecase::password::{hash_password, verify_password};
use crate::usecase::verification::new_verification_token;

#[derive(Default)]
pub struct UpdateSettingsInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub two_factor_enabled: Option<bool>,
}

/// Settings changes apply immediately, except an email change which parks the
/// account as unverified until the new address confirms.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingsOutcome {
    Updated,
    ConfirmationSent,
}

pub struct UpdateSettingsUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    pub users: U,
    pub verification_tokens: V,
}

impl<U, V> UpdateSettingsUseCase<U, V>
where
    U: UserRepository,
    V: EmailTokenRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateSettingsInput,
    ) -> Result<SettingsOutcome, AuthServiceError> {
        if input.name.is_none()
            && input.image.is_none()
            && input.email.is_none()
            && input.new_password.is_none()
            && input.two_factor_enabled.is_none()
        {
            return Err(AuthServiceError::MissingData);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if input.name.is_some() || input.image.is_some() {
            self.users
                .update_profile(user.id, input.name.as_deref(), input.image.as_deref())
                .await?;
        }

        if let Some(ref new_password) = input.new_password {
            // Changing the password requires re-proving the current one;
            // OAuth-only accounts have none to prove.
            let stored_hash = user
                .password_hash
                .as_deref()
                .ok_or(AuthServiceError::InvalidCredentials)?;
            let current = input
                .current_password
                .as_deref()
                .ok_or(AuthServiceError::MissingData)?;
            if !verify_password(current, stored_hash) {
                return Err(AuthServiceError::InvalidCredentials);
            }
            if !valid_password(new_password) {
                return Err(AuthServiceError::WeakPassword);
            }
            let hash = hash_password(new_password)?;
            self.users.set_password_hash(user.id, &hash).await?;
        }

        if let Some(enabled) = input.two_factor_enabled {
            self.users.set_two_factor_enabled(user.id, enabled).await?;
        }

        if let Some(ref email) = input.email {
            let email = normalize_email(email);
            if !valid_email(&email) {
                return Err(AuthServiceError::InvalidEmail);
            }
            if email != user.email {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(AuthServiceError::EmailTaken);
                }
                self.users.change_email(user.id, &email).await?;
                let (token, event) = new_verification_token(&email);
                self.verification_tokens
                    .replace_for_email(&token, &event)
                    .await?;
                return Ok(SettingsOutcome::ConfirmationSent);
            }
        }

        Ok(SettingsOutcome::Updated)
    }
}
