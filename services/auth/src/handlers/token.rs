use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use tats_auth_types::{
    cookie::{
        TATS_ACCESS_TOKEN, TATS_REFRESH_TOKEN, clear_cookies, set_access_token_cookie,
        set_refresh_token_cookie,
    },
    identity::IdentityHeaders,
    token::validate_access_token,
};

use crate::error::AuthServiceError;
use crate::handlers::token_expires_headers;
use crate::state::AppState;
use crate::usecase::token::RefreshTokenUseCase;

// ── GET /auth/token ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckTokenQuery {
    pub role: Option<u8>,
}

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub user_id: uuid::Uuid,
    pub user_role: u8,
    pub access_token_exp: u64,
}

pub async fn check_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CheckTokenQuery>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let token_value = jar
        .get(TATS_ACCESS_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::InvalidToken)?;

    let info = validate_access_token(&token_value, &state.jwt_secret)
        .map_err(|_| AuthServiceError::InvalidToken)?;

    if let Some(min_role) = query.role {
        if info.user_role < min_role {
            return Err(AuthServiceError::InvalidToken);
        }
    }

    let body = CheckTokenResponse {
        user_id: info.user_id,
        user_role: info.user_role,
        access_token_exp: info.access_token_exp,
    };
    let headers = token_expires_headers(info.access_token_exp);

    Ok((StatusCode::OK, headers, Json(body)))
}

// ── PATCH /auth/token ─────────────────────────────────────────────────────────

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let refresh_value = jar
        .get(TATS_REFRESH_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::InvalidRefreshToken)?;

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase.execute(&refresh_value).await?;

    let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());
    let headers = token_expires_headers(out.access_token_exp);

    Ok((StatusCode::CREATED, jar, headers))
}

// ── DELETE /auth/token ────────────────────────────────────────────────────────

pub async fn revoke_token(
    State(state): State<AppState>,
    _identity: IdentityHeaders,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let jar = clear_cookies(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
