use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use tats_auth_types::cookie::{set_access_token_cookie, set_refresh_token_cookie};

use crate::error::AuthServiceError;
use crate::handlers::token_expires_headers;
use crate::state::AppState;
use crate::usecase::oauth::{LinkOauthInput, LinkOauthUseCase};

#[derive(Deserialize)]
pub struct LinkOauthRequest {
    pub provider: String,
    pub provider_account_id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
}

// ── POST /auth/oauth/link ────────────────────────────────────────────────────

/// Sign in with a provider identity whose handshake completed upstream.
pub async fn link_oauth(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LinkOauthRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = LinkOauthUseCase {
        users: state.user_repo(),
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase
        .execute(LinkOauthInput {
            provider: body.provider,
            provider_account_id: body.provider_account_id,
            email: body.email,
            name: body.name,
            image: body.image,
        })
        .await?;

    let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());
    let headers = token_expires_headers(out.access_token_exp);

    Ok((StatusCode::CREATED, jar, headers))
}
