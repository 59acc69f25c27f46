use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use tats_auth_types::identity::IdentityHeaders;

use crate::domain::repository::BackendPort;
use crate::domain::types::{Client, NewClient, Station};
use crate::error::StationServiceError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::clients::ClientsUseCase;

// ── GET /clients ─────────────────────────────────────────────────────────────

pub async fn list_clients<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<Client>>, StationServiceError> {
    let uc = ClientsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.list().await?))
}

// ── POST /clients ────────────────────────────────────────────────────────────

pub async fn create_client<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Json(body): Json<NewClient>,
) -> Result<(StatusCode, Json<Client>), StationServiceError> {
    require_admin(&identity)?;
    let uc = ClientsUseCase {
        backend: state.backend.clone(),
    };
    let client = uc.create(body).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// ── GET /clients/{id} ────────────────────────────────────────────────────────

pub async fn get_client<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, StationServiceError> {
    let uc = ClientsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.get(id).await?))
}

// ── PUT /clients/{id} ────────────────────────────────────────────────────────

pub async fn update_client<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
    Json(body): Json<NewClient>,
) -> Result<Json<Client>, StationServiceError> {
    require_admin(&identity)?;
    let uc = ClientsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.update(id, body).await?))
}

// ── DELETE /clients/{id} ─────────────────────────────────────────────────────

pub async fn delete_client<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StationServiceError> {
    require_admin(&identity)?;
    let uc = ClientsUseCase {
        backend: state.backend.clone(),
    };
    uc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /clients/{id}/stations ───────────────────────────────────────────────

pub async fn list_client_stations<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Station>>, StationServiceError> {
    let uc = ClientsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.stations(id).await?))
}
