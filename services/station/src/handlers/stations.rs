use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use tats_auth_types::identity::IdentityHeaders;

use crate::domain::repository::BackendPort;
use crate::domain::types::{NewStation, Station};
use crate::error::StationServiceError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::stations::StationsUseCase;

// ── POST /stations ───────────────────────────────────────────────────────────

pub async fn create_station<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Json(body): Json<NewStation>,
) -> Result<(StatusCode, Json<Station>), StationServiceError> {
    require_admin(&identity)?;
    let uc = StationsUseCase {
        backend: state.backend.clone(),
    };
    let station = uc.create(body).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

// ── GET /stations/{id} ───────────────────────────────────────────────────────

pub async fn get_station<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
) -> Result<Json<Station>, StationServiceError> {
    let uc = StationsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.get(id).await?))
}

// ── PUT /stations/{id} ───────────────────────────────────────────────────────

pub async fn update_station<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
    Json(body): Json<NewStation>,
) -> Result<Json<Station>, StationServiceError> {
    require_admin(&identity)?;
    let uc = StationsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.update(id, body).await?))
}

// ── DELETE /stations/{id} ────────────────────────────────────────────────────

pub async fn delete_station<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StationServiceError> {
    require_admin(&identity)?;
    let uc = StationsUseCase {
        backend: state.backend.clone(),
    };
    uc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
