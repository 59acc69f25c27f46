//! reqwest implementation of [`BackendPort`].
//!
//! Upstream 404s become `None`/`false` so usecases can name the missing
//! resource; any other non-2xx becomes `BackendRejected`, and transport
//! failures become `BackendUnavailable`. Nothing is retried — a failed
//! request surfaces to the dashboard as-is.

use chrono::SecondsFormat;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use tats_domain::pagination::DateRange;

use crate::domain::repository::BackendPort;
use crate::domain::types::{
    Client as BillingClient, NewClient, NewProduct, NewPump, NewStation, Product, Pump, ReportRow,
    Station, Transaction, TransactionFilter,
};
use crate::error::StationServiceError;

#[derive(Clone)]
pub struct RestBackendClient {
    client: Client,
    base_url: String,
    reports_base_url: String,
}

impl RestBackendClient {
    pub fn new(base_url: &str, reports_base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            reports_base_url: reports_base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn unavailable(err: reqwest::Error) -> StationServiceError {
        tracing::warn!(error = %err, "backend unreachable");
        StationServiceError::BackendUnavailable
    }

    fn rejected(status: StatusCode) -> StationServiceError {
        tracing::warn!(status = status.as_u16(), "backend rejected request");
        StationServiceError::BackendRejected {
            status: status.as_u16(),
        }
    }

    async fn parse<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StationServiceError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StationServiceError::Internal(anyhow::anyhow!("decode backend body: {e}")))
    }

    /// GET expecting a body; upstream 404 is an upstream fault here.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, StationServiceError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::unavailable)?;
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Self::parse(response).await
    }

    /// GET where upstream 404 means "no such resource".
    async fn get_json_opt<T: DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<Option<T>, StationServiceError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Ok(Some(Self::parse(response).await?))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<T, StationServiceError> {
        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(Self::unavailable)?;
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Self::parse(response).await
    }

    async fn send_json_opt<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<Option<T>, StationServiceError> {
        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(Self::unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Ok(Some(Self::parse(response).await?))
    }

    async fn delete(&self, url: String) -> Result<bool, StationServiceError> {
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(Self::unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Ok(true)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn range_params(range: &DateRange) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = range.from {
            params.push(("from", from.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(to) = range.to {
            params.push(("to", to.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        params
    }
}

impl BackendPort for RestBackendClient {
    // ── Clients ──────────────────────────────────────────────────────────────

    async fn list_clients(&self) -> Result<Vec<BillingClient>, StationServiceError> {
        self.get_json(self.url("/clients")).await
    }

    async fn create_client(
        &self,
        client: &NewClient,
    ) -> Result<BillingClient, StationServiceError> {
        self.send_json(Method::POST, self.url("/clients"), client)
            .await
    }

    async fn get_client(&self, id: i64) -> Result<Option<BillingClient>, StationServiceError> {
        self.get_json_opt(self.url(&format!("/clients/{id}"))).await
    }

    async fn update_client(
        &self,
        id: i64,
        client: &NewClient,
    ) -> Result<Option<BillingClient>, StationServiceError> {
        self.send_json_opt(Method::PUT, self.url(&format!("/clients/{id}")), client)
            .await
    }

    async fn delete_client(&self, id: i64) -> Result<bool, StationServiceError> {
        self.delete(self.url(&format!("/clients/{id}"))).await
    }

    async fn list_client_stations(
        &self,
        client_id: i64,
    ) -> Result<Option<Vec<Station>>, StationServiceError> {
        self.get_json_opt(self.url(&format!("/clients/{client_id}/stations")))
            .await
    }

    // ── Stations ─────────────────────────────────────────────────────────────

    async fn create_station(&self, station: &NewStation) -> Result<Station, StationServiceError> {
        self.send_json(Method::POST, self.url("/stations"), station)
            .await
    }

    async fn get_station(&self, id: i64) -> Result<Option<Station>, StationServiceError> {
        self.get_json_opt(self.url(&format!("/stations/{id}"))).await
    }

    async fn update_station(
        &self,
        id: i64,
        station: &NewStation,
    ) -> Result<Option<Station>, StationServiceError> {
        self.send_json_opt(Method::PUT, self.url(&format!("/stations/{id}")), station)
            .await
    }

    async fn delete_station(&self, id: i64) -> Result<bool, StationServiceError> {
        self.delete(self.url(&format!("/stations/{id}"))).await
    }

    // ── Pumps ────────────────────────────────────────────────────────────────

    async fn list_pumps(&self, station_id: i64) -> Result<Option<Vec<Pump>>, StationServiceError> {
        self.get_json_opt(self.url(&format!("/station/managePumps/{station_id}")))
            .await
    }

    async fn create_pump(
        &self,
        station_id: i64,
        pump: &NewPump,
    ) -> Result<Pump, StationServiceError> {
        self.send_json(
            Method::POST,
            self.url(&format!("/station/managePumps/{station_id}")),
            pump,
        )
        .await
    }

    async fn update_pump(
        &self,
        station_id: i64,
        pump_id: i64,
        pump: &NewPump,
    ) -> Result<Option<Pump>, StationServiceError> {
        self.send_json_opt(
            Method::PUT,
            self.url(&format!("/station/managePumps/{station_id}/{pump_id}")),
            pump,
        )
        .await
    }

    async fn delete_pump(
        &self,
        station_id: i64,
        pump_id: i64,
    ) -> Result<bool, StationServiceError> {
        self.delete(self.url(&format!("/station/managePumps/{station_id}/{pump_id}")))
            .await
    }

    // ── Products ─────────────────────────────────────────────────────────────

    async fn list_products(
        &self,
        station_id: i64,
    ) -> Result<Option<Vec<Product>>, StationServiceError> {
        self.get_json_opt(self.url(&format!("/stations/{station_id}/products")))
            .await
    }

    async fn create_product(
        &self,
        station_id: i64,
        product: &NewProduct,
    ) -> Result<Product, StationServiceError> {
        self.send_json(
            Method::POST,
            self.url(&format!("/stations/{station_id}/products")),
            product,
        )
        .await
    }

    async fn update_product(
        &self,
        station_id: i64,
        product_id: i64,
        product: &NewProduct,
    ) -> Result<Option<Product>, StationServiceError> {
        self.send_json_opt(
            Method::PUT,
            self.url(&format!("/stations/{station_id}/products/{product_id}")),
            product,
        )
        .await
    }

    async fn delete_product(
        &self,
        station_id: i64,
        product_id: i64,
    ) -> Result<bool, StationServiceError> {
        self.delete(self.url(&format!("/stations/{station_id}/products/{product_id}")))
            .await
    }

    // ── Transactions + reports ───────────────────────────────────────────────

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StationServiceError> {
        let mut params = Self::range_params(&filter.range);
        if let Some(station_id) = filter.station_id {
            params.push(("stationId", station_id.to_string()));
        }
        params.push(("page", filter.page.page.to_string()));
        params.push(("perPage", filter.page.per_page.to_string()));

        let response = self
            .client
            .get(self.url("/transactions"))
            .query(&params)
            .send()
            .await
            .map_err(Self::unavailable)?;
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Self::parse(response).await
    }

    async fn fetch_report(
        &self,
        station_id: i64,
        range: &DateRange,
    ) -> Result<Option<Vec<ReportRow>>, StationServiceError> {
        let url = format!("{}/reports/v2/{station_id}", self.reports_base_url);
        let response = self
            .client
            .get(&url)
            .query(&Self::range_params(range))
            .send()
            .await
            .map_err(Self::unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::rejected(response.status()));
        }
        Ok(Some(Self::parse(response).await?))
    }
}
