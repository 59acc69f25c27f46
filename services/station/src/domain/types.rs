//! Wire types for the fuel-station REST backend.
//!
//! These records are owned by the backend; this service only validates input
//! shape before forwarding. JSON is camelCase on both sides of the proxy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tats_domain::pagination::{DateRange, PageRequest};
use tats_domain::station::NozzleIdentifier;

/// A billing client owning one or more stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Client payload as submitted by the dashboard forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStation {
    pub client_id: i64,
    pub name: String,
    pub address: String,
}

/// A dispensing point on a pump.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nozzle {
    pub number: i32,
    pub product_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pump {
    pub id: i64,
    pub station_id: i64,
    pub address: String,
    pub identifier: NozzleIdentifier,
    pub nozzles: Vec<Nozzle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPump {
    pub address: String,
    pub identifier: NozzleIdentifier,
    pub nozzles: Vec<Nozzle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub station_id: i64,
    pub name: String,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub unit_price: f64,
}

/// A completed fueling transaction as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub station_id: i64,
    pub pump_address: Option<i32>,
    pub nozzle: Option<i32>,
    pub product: String,
    pub volume: f64,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Filters accepted by the transactions list.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub station_id: Option<i64>,
    pub range: DateRange,
    pub page: PageRequest,
}

/// One aggregated row of a station report (per product).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub product: String,
    pub volume: f64,
    pub amount: f64,
    pub count: i64,
}

/// Report enriched with totals for the dashboard's charts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub rows: Vec<ReportRow>,
    pub total_volume: f64,
    pub total_amount: f64,
}

impl ReportSummary {
    pub fn from_rows(rows: Vec<ReportRow>) -> Self {
        let total_volume = rows.iter().map(|r| r.volume).sum();
        let total_amount = rows.iter().map(|r| r.amount).sum();
        Self {
            rows,
            total_volume,
            total_amount,
        }
    }
}
