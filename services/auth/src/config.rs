/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "tats.example").
    pub cookie_domain: String,
    /// Dashboard base URL used to build verification/reset links in emails.
    /// Env var: `APP_BASE_URL`.
    pub app_base_url: String,
    /// Transactional email API endpoint. Unset means log-only delivery
    /// (local development). Env var: `EMAIL_API_URL`.
    pub email_api_url: Option<String>,
    /// Bearer key for the email API. Env var: `EMAIL_API_KEY`.
    pub email_api_key: Option<String>,
    /// Sender address for outbound mail (default "no-reply@tats.example").
    /// Env var: `EMAIL_FROM`.
    pub email_from: String,
    /// TCP port to listen on (default 3210). Env var: `AUTH_PORT`.
    pub auth_port: u16,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            app_base_url: std::env::var("APP_BASE_URL").expect("APP_BASE_URL"),
            email_api_url: std::env::var("EMAIL_API_URL").ok(),
            email_api_key: std::env::var("EMAIL_API_KEY").ok(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@tats.example".to_owned()),
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3210),
        }
    }
}
