use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use tats_auth_types::identity::IdentityHeaders;

use crate::domain::repository::BackendPort;
use crate::domain::types::{NewProduct, Product};
use crate::error::StationServiceError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::products::ProductsUseCase;

// ── GET /stations/{id}/products ──────────────────────────────────────────────

pub async fn list_products<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(station_id): Path<i64>,
) -> Result<Json<Vec<Product>>, StationServiceError> {
    let uc = ProductsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.list(station_id).await?))
}

// ── POST /stations/{id}/products ─────────────────────────────────────────────

pub async fn create_product<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(station_id): Path<i64>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), StationServiceError> {
    require_admin(&identity)?;
    let uc = ProductsUseCase {
        backend: state.backend.clone(),
    };
    let product = uc.create(station_id, body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// ── PUT /stations/{id}/products/{product_id} ─────────────────────────────────

pub async fn update_product<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path((station_id, product_id)): Path<(i64, i64)>,
    Json(body): Json<NewProduct>,
) -> Result<Json<Product>, StationServiceError> {
    require_admin(&identity)?;
    let uc = ProductsUseCase {
        backend: state.backend.clone(),
    };
    Ok(Json(uc.update(station_id, product_id, body).await?))
}

// ── DELETE /stations/{id}/products/{product_id} ──────────────────────────────

pub async fn delete_product<B: BackendPort + Clone + Send + Sync + 'static>(
    identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path((station_id, product_id)): Path<(i64, i64)>,
) -> Result<StatusCode, StationServiceError> {
    require_admin(&identity)?;
    let uc = ProductsUseCase {
        backend: state.backend.clone(),
    };
    uc.delete(station_id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
