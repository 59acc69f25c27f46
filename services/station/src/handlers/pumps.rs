use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tats_auth_types::identity::IdentityHeaders;

use crate::domain::repository::BackendPort;
use crate::domain::types::{Nozzle, Pump};
use crate::error::StationServiceError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::pumps::{NewPumpInput, PumpsUseCase};

/// The identifier mode stays a plain string here so an unknown mode becomes a
/// form error instead of a deserialization failure.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpRequest {
    pub address: String,
    pub identifier: String,
    pub nozzles: Vec<Nozzle>,
}

impl From<PumpRequest> for NewPumpInput {
    fn from(body: PumpRequest) -> Self {
        Self {
            address: body.address,
            identifier: body.identifier,
            nozzles: body.nozzles,
        }
    }
}

// ── GET /stations/{id}/pumps ─────────────────────────────────────────────────

pub async fn list_pumps<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(station_id): Path<i64>,
) -> Result<Json<Vec<Pump>>, StationServiceError> {
    let uc = PumpsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.list(station_id).await?))
}

// ── POST /stations/{id}/pumps ────────────────────────────────────────────────

pub async fn create_pump<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(station_id): Path<i64>,
    Json(body): Json<PumpRequest>,
) -> Result<(StatusCode, Json<Pump>), StationServiceError> {
    require_admin(&identity)?;
    let uc = PumpsUseCase {
        backend: state.backend.clone(),
    };
    let pump = uc.create(station_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(pump)))
}

// ── PUT /stations/{id}/pumps/{pump_id} ───────────────────────────────────────

pub async fn update_pump<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path((station_id, pump_id)): Path<(i64, i64)>,
    Json(body): Json<PumpRequest>,
) -> Result<Json<Pump>, StationServiceError> {
    require_admin(&identity)?;
    let uc = PumpsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.update(station_id, pump_id, body.into()).await?))
}

// ── DELETE /stations/{id}/pumps/{pump_id} ────────────────────────────────────

pub async fn delete_pump<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path((station_id, pump_id)): Path<(i64, i64)>,
) -> Result<StatusCode, StationServiceError> {
    require_admin(&identity)?;
    let uc = PumpsUseCase {
        backend: state.backend.clone(),
    };
    uc.delete(station_id, pump_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
