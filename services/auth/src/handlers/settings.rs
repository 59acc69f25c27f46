use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use tats_auth_types::identity::IdentityHeaders;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::settings::{SettingsOutcome, UpdateSettingsInput, UpdateSettingsUseCase};

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub two_factor_enabled: Option<bool>,
}

// ── PATCH /auth/settings ─────────────────────────────────────────────────────

pub async fn update_settings(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Response, AuthServiceError> {
    let usecase = UpdateSettingsUseCase {
        users: state.user_repo(),
        verification_tokens: state.verification_token_repo(),
    };

    let outcome = usecase
        .execute(
            identity.user_id,
            UpdateSettingsInput {
                name: body.name,
                image: body.image,
                email: body.email,
                current_password: body.current_password,
                new_password: body.new_password,
                two_factor_enabled: body.two_factor_enabled,
            },
        )
        .await?;

    match outcome {
        SettingsOutcome::Updated => Ok(StatusCode::NO_CONTENT.into_response()),
        // Email changed: the account is unverified until the new address confirms.
        SettingsOutcome::ConfirmationSent => Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "status": "confirmation_sent" })),
        )
            .into_response()),
    }
}
