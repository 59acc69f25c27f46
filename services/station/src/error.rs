use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Station service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum StationServiceError {
    #[error("client not found")]
    ClientNotFound,
    #[error("station not found")]
    StationNotFound,
    #[error("pump not found")]
    PumpNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("missing data")]
    MissingData,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid nozzle identifier")]
    InvalidIdentifier,
    #[error("invalid nozzle configuration")]
    InvalidNozzles,
    #[error("invalid price")]
    InvalidPrice,
    #[error("invalid date range")]
    InvalidDateRange,
    #[error("forbidden")]
    Forbidden,
    /// Upstream answered with a non-2xx status.
    #[error("backend rejected request")]
    BackendRejected { status: u16 },
    /// Upstream could not be reached at all.
    #[error("backend unavailable")]
    BackendUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StationServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientNotFound => "CLIENT_NOT_FOUND",
            Self::StationNotFound => "STATION_NOT_FOUND",
            Self::PumpNotFound => "PUMP_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::InvalidNozzles => "INVALID_NOZZLES",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::Forbidden => "FORBIDDEN",
            Self::BackendRejected { .. } => "BACKEND_REJECTED",
            Self::BackendUnavailable => "BACKEND_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for StationServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ClientNotFound
            | Self::StationNotFound
            | Self::PumpNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::MissingData
            | Self::InvalidEmail
            | Self::InvalidIdentifier
            | Self::InvalidNozzles
            | Self::InvalidPrice
            | Self::InvalidDateRange => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BackendRejected { .. } | Self::BackendUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
