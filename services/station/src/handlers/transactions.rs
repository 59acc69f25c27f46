use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tats_auth_types::identity::IdentityHeaders;
use tats_domain::pagination::{DateRange, PageRequest};

use crate::domain::repository::BackendPort;
use crate::domain::types::{Transaction, TransactionFilter};
use crate::error::StationServiceError;
use crate::state::AppState;
use crate::usecase::transactions::ListTransactionsUseCase;

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionListQuery {
    pub station_id: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl From<TransactionListQuery> for TransactionFilter {
    fn from(query: TransactionListQuery) -> Self {
        let mut page = PageRequest::default();
        if let Some(per_page) = query.per_page {
            page.per_page = per_page;
        }
        if let Some(page_no) = query.page {
            page.page = page_no;
        }
        Self {
            station_id: query.station_id,
            range: DateRange {
                from: query.from,
                to: query.to,
            },
            page,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    pub station_id: i64,
    pub pump_address: Option<i32>,
    pub nozzle: Option<i32>,
    pub product: String,
    pub volume: f64,
    pub amount: f64,
    #[serde(serialize_with = "tats_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            station_id: tx.station_id,
            pump_address: tx.pump_address,
            nozzle: tx.nozzle,
            product: tx.product,
            volume: tx.volume,
            amount: tx.amount,
            created_at: tx.created_at,
        }
    }
}

// ── GET /transactions ────────────────────────────────────────────────────────

pub async fn list_transactions<B: BackendPort + Clone + Send + Sync + 'static>(
    _identity: IdentityHeaders,
    State(state): State<AppState<B>>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<TransactionResponse>>, StationServiceError> {
    let query: TransactionListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| StationServiceError::MissingData)?
        .unwrap_or_default();

    let uc = ListTransactionsUseCase {
        backend: state.backend.clone(),
    };
    let transactions = uc.execute(query.into()).await?;
    Ok(Json(
        transactions.into_iter().map(TransactionResponse::from).collect(),
    ))
}
