use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::verification::{ConsumeVerificationUseCase, ResendVerificationUseCase};

// ── POST /auth/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ConsumeVerificationUseCase {
        users: state.user_repo(),
        verification_tokens: state.verification_token_repo(),
    };
    usecase.execute(&body.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/verification ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Always 204 — the response must not reveal whether the email exists.
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(body): Json<ResendVerificationRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ResendVerificationUseCase {
        users: state.user_repo(),
        verification_tokens: state.verification_token_repo(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
