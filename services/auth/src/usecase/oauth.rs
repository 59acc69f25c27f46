use chrono::Utc;
use uuid::Uuid;

use tats_domain::user::UserRole;

use crate::domain::repository::{AccountRepository, UserRepository};
use crate::domain::types::{AuthUser, OauthAccount, normalize_email, valid_email};
use crate::error::AuthServiceError;
use crate::usecase::login::SignedIn;
use crate::usecase::token::{issue_access_token, issue_refresh_token};

/// Provider identity whose handshake already completed upstream (the BFF
/// exchanged the authorization code and fetched the profile).
pub struct LinkOauthInput {
    pub provider: String,
    pub provider_account_id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
}

pub struct LinkOauthUseCase<U, A>
where
    U: UserRepository,
    A: AccountRepository,
{
    pub users: U,
    pub accounts: A,
    pub jwt_secret: String,
}

impl<U, A> LinkOauthUseCase<U, A>
where
    U: UserRepository,
    A: AccountRepository,
{
    /// Sign in through an OAuth identity, creating the user + link on first
    /// contact. The provider attested the email, so new accounts start
    /// verified. A credential account already holding the email is never
    /// silently merged — the caller gets `EmailTaken` and the user must sign
    /// in with their password instead.
    pub async fn execute(&self, input: LinkOauthInput) -> Result<SignedIn, AuthServiceError> {
        if input.provider.trim().is_empty() || input.provider_account_id.trim().is_empty() {
            return Err(AuthServiceError::MissingData);
        }
        let email = normalize_email(&input.email);
        if !valid_email(&email) {
            return Err(AuthServiceError::InvalidEmail);
        }

        let user = match self
            .accounts
            .find_by_provider(&input.provider, &input.provider_account_id)
            .await?
        {
            Some(account) => self
                .users
                .find_by_id(account.user_id)
                .await?
                .ok_or(AuthServiceError::UserNotFound)?,
            None => {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(AuthServiceError::EmailTaken);
                }
                let now = Utc::now();
                let user = AuthUser {
                    id: Uuid::now_v7(),
                    name: input.name.trim().to_owned(),
                    email: email.clone(),
                    password_hash: None,
                    email_verified: Some(now),
                    role: UserRole::Normal.as_u8(),
                    two_factor_enabled: false,
                    image: input.image.clone(),
                    created_at: now,
                    updated_at: now,
                };
                self.users.create(&user).await?;
                self.accounts
                    .create(&OauthAccount {
                        id: Uuid::new_v4(),
                        user_id: user.id,
                        provider: input.provider.clone(),
                        provider_account_id: input.provider_account_id.clone(),
                        created_at: now,
                    })
                    .await?;
                user
            }
        };

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(SignedIn {
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}
