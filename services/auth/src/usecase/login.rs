use crate::domain::repository::{
    EmailTokenRepository, TwoFactorConfirmationRepository, UserRepository,
};
use crate::domain::types::{normalize_email, valid_email};
use crate::error::AuthServiceError;
use crate::usecase::password::verify_password;
use crate::usecase::token::{issue_access_token, issue_refresh_token};
use crate::usecase::verification::new_verification_token;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful credential sign-in: tokens ready to be set as cookies.
#[derive(Debug)]
pub struct SignedIn {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Sign-in either completes, or is parked behind a fresh verification email
/// when the account has never proven its address.
#[derive(Debug)]
pub enum LoginOutcome {
    SignedIn(SignedIn),
    ConfirmationSent,
}

pub struct LoginUseCase<U, V, T>
where
    U: UserRepository,
    V: EmailTokenRepository,
    T: TwoFactorConfirmationRepository,
{
    pub users: U,
    pub verification_tokens: V,
    pub two_factor: T,
    pub jwt_secret: String,
}

impl<U, V, T> LoginUseCase<U, V, T>
where
    U: UserRepository,
    V: EmailTokenRepository,
    T: TwoFactorConfirmationRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutcome, AuthServiceError> {
        let email = normalize_email(&input.email);
        if !valid_email(&email) || input.password.is_empty() {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Unknown email and OAuth-only account fall through to the same error
        // as a wrong password.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let Some(ref stored_hash) = user.password_hash else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        // Unverified accounts never reach the password check; they get a fresh
        // verification email (superseding any earlier token) instead.
        if user.email_verified.is_none() {
            let (token, event) = new_verification_token(&email);
            self.verification_tokens
                .replace_for_email(&token, &event)
                .await?;
            return Ok(LoginOutcome::ConfirmationSent);
        }

        if !verify_password(&input.password, stored_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Two-factor gate: a confirmation row must already exist (written by
        // the challenge step) and is spent here, so every login needs a fresh
        // challenge.
        if user.two_factor_enabled {
            let confirmation = self
                .two_factor
                .find_by_user(user.id)
                .await?
                .ok_or(AuthServiceError::TwoFactorRequired)?;
            self.two_factor.delete(confirmation.id).await?;
        }

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(LoginOutcome::SignedIn(SignedIn {
            access_token,
            access_token_exp,
            refresh_token,
        }))
    }
}
