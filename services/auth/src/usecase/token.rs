use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use tats_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use tats_auth_types::token::{JwtClaims, validate_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::AuthUser;
use crate::error::AuthServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn sign(user: &AuthUser, exp: u64, secret: &str) -> Result<String, AuthServiceError> {
    let claims = JwtClaims {
        sub: user.id.to_string(),
        role: user.role,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))
}

pub fn issue_access_token(
    user: &AuthUser,
    secret: &str,
) -> Result<(String, u64), AuthServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    Ok((sign(user, exp, secret)?, exp))
}

pub fn issue_refresh_token(user: &AuthUser, secret: &str) -> Result<String, AuthServiceError> {
    sign(user, now_secs() + REFRESH_TOKEN_EXP, secret)
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub user_id: Uuid,
    pub user_role: u8,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshTokenOutput, AuthServiceError> {
        // Validate refresh token (sig + exp); an expired access token is irrelevant here.
        let claims = validate_token(refresh_token_value, &self.jwt_secret)
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::InvalidRefreshToken)?;

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(RefreshTokenOutput {
            user_id: user.id,
            user_role: user.role,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}
