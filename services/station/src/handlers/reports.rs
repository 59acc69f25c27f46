use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use tats_auth_types::identity::IdentityHeaders;
use tats_domain::pagination::DateRange;

use crate::domain::repository::BackendPort;
use crate::domain::types::ReportSummary;
use crate::error::StationServiceError;
use crate::state::AppState;
use crate::usecase::reports::StationReportUseCase;

#[derive(Deserialize, Default)]
pub struct ReportQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

// ── GET /reports/{station_id} ────────────────────────────────────────────────

pub async fn station_report<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    Path(station_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportSummary>, StationServiceError> {
    let uc = StationReportUseCase {
        backend: state.backend.clone(),
    };
    let summary = uc
        .execute(
            station_id,
            DateRange {
                from: query.from,
                to: query.to,
            },
        )
        .await?;
    Ok(Json(summary))
}
