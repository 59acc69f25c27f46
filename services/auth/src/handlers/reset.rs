use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::reset::{ConfirmPasswordResetUseCase, RequestPasswordResetUseCase};

// ── POST /auth/reset ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestResetRequest {
    pub email: String,
}

/// Always 204 — the response must not reveal whether the email exists.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestResetRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = RequestPasswordResetUseCase {
        users: state.user_repo(),
        reset_tokens: state.password_reset_token_repo(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/reset/confirm ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmResetRequest {
    pub token: String,
    pub password: String,
}

pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(body): Json<ConfirmResetRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ConfirmPasswordResetUseCase {
        users: state.user_repo(),
        reset_tokens: state.password_reset_token_repo(),
        outbox: state.outbox_repo(),
    };
    usecase.execute(&body.token, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
