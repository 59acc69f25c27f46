use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use tats_auth::config::AuthConfig;
use tats_auth::infra::email::{
    EmailWorkerConfig, HttpEmailSender, LogEmailSender, spawn_outbox_worker,
};
use tats_auth::router::build_router;
use tats_auth::state::AppState;

#[tokio::main]
async fn main() {
    tats_core::tracing::init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Email delivery: real API when configured, log-only otherwise.
    match (config.email_api_url.clone(), config.email_api_key.clone()) {
        (Some(api_url), Some(api_key)) => {
            spawn_outbox_worker(
                db.clone(),
                Arc::new(HttpEmailSender::new(api_url, api_key, config.email_from.clone())),
                config.app_base_url.clone(),
                EmailWorkerConfig::default(),
            );
        }
        _ => {
            info!("EMAIL_API_URL unset, outbox delivery is log-only");
            spawn_outbox_worker(
                db.clone(),
                Arc::new(LogEmailSender),
                config.app_base_url.clone(),
                EmailWorkerConfig::default(),
            );
        }
    }

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
