use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use tats_auth_types::cookie::{set_access_token_cookie, set_refresh_token_cookie};

use crate::error::AuthServiceError;
use crate::handlers::token_expires_headers;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginOutcome, LoginUseCase};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AuthServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        verification_tokens: state.verification_token_repo(),
        two_factor: state.two_factor_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let outcome = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    match outcome {
        LoginOutcome::ConfirmationSent => Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "status": "confirmation_sent" })),
        )
            .into_response()),
        LoginOutcome::SignedIn(out) => {
            let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
            let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());
            let headers = token_expires_headers(out.access_token_exp);
            Ok((StatusCode::CREATED, jar, headers).into_response())
        }
    }
}
