use tracing::info;

use tats_station::config::StationConfig;
use tats_station::infra::rest::RestBackendClient;
use tats_station::router::build_router;
use tats_station::state::AppState;

#[tokio::main]
async fn main() {
    tats_core::tracing::init_tracing();

    let config = StationConfig::from_env();

    let backend = RestBackendClient::new(&config.backend_api_url, &config.reports_api_url);
    let state = AppState { backend };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.station_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("station service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
