pub mod login;
pub mod oauth;
pub mod register;
pub mod reset;
pub mod settings;
pub mod token;
pub mod verification;

use axum::http::{HeaderMap, HeaderName, HeaderValue};

const X_TATS_ACCESS_TOKEN_EXPIRES: &str = "x-tats-access-token-expires";

/// Expiry header set alongside every issued access token so the dashboard can
/// schedule its refresh.
pub(crate) fn token_expires_headers(exp: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(X_TATS_ACCESS_TOKEN_EXPIRES),
        HeaderValue::from_str(&exp.to_string()).unwrap(),
    );
    headers
}
