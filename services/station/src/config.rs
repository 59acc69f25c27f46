/// Station service configuration loaded from environment variables.
#[derive(Debug)]
pub struct StationConfig {
    /// Base URL of the fuel-station REST backend. Env var: `BACKEND_API_URL`.
    pub backend_api_url: String,
    /// Base URL of the reporting backend (defaults to `BACKEND_API_URL`).
    /// Env var: `REPORTS_API_URL`.
    pub reports_api_url: String,
    /// TCP port to listen on (default 3220). Env var: `STATION_PORT`.
    pub station_port: u16,
}

impl StationConfig {
    pub fn from_env() -> Self {
        let backend_api_url = std::env::var("BACKEND_API_URL").expect("BACKEND_API_URL");
        Self {
            reports_api_url: std::env::var("REPORTS_API_URL")
                .unwrap_or_else(|_| backend_api_url.clone()),
            backend_api_url,
            station_port: std::env::var("STATION_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3220),
        }
    }
}
