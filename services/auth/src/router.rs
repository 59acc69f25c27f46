use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use tats_core::health::{healthz, readyz};
use tats_core::middleware::request_id_layer;

use crate::handlers::{
    login::login,
    oauth::link_oauth,
    register::register,
    reset::{confirm_password_reset, request_password_reset},
    settings::update_settings,
    token::{check_token, refresh_token, revoke_token},
    verification::{resend_verification, verify_email},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration + credential sign-in
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Email verification
        .route("/auth/verify", post(verify_email))
        .route("/auth/verification", post(resend_verification))
        // Password reset
        .route("/auth/reset", post(request_password_reset))
        .route("/auth/reset/confirm", post(confirm_password_reset))
        // OAuth link
        .route("/auth/oauth/link", post(link_oauth))
        // Session tokens
        .route("/auth/token", get(check_token))
        .route("/auth/token", patch(refresh_token))
        .route("/auth/token", delete(revoke_token))
        // Settings
        .route("/auth/settings", patch(update_settings))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
