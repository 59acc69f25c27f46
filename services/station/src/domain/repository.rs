use std::future::Future;

use tats_domain::pagination::DateRange;

use crate::domain::types::{
    Client, NewClient, NewProduct, NewPump, NewStation, Product, Pump, ReportRow, Station,
    Transaction, TransactionFilter,
};
use crate::error::StationServiceError;

/// Port to the external fuel-station REST backend.
///
/// Lookup methods return `None` for upstream 404s; update/delete report the
/// same condition so usecases can map it to the right not-found variant.
///
/// Methods are declared `-> impl Future + Send` rather than `async fn`:
/// handlers are generic over this port, and axum needs their futures to be
/// provably Send. Implementations still write plain `async fn`.
pub trait BackendPort: Send + Sync {
    // Clients
    fn list_clients(&self)
    -> impl Future<Output = Result<Vec<Client>, StationServiceError>> + Send;
    fn create_client(
        &self,
        client: &NewClient,
    ) -> impl Future<Output = Result<Client, StationServiceError>> + Send;
    fn get_client(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Client>, StationServiceError>> + Send;
    fn update_client(
        &self,
        id: i64,
        client: &NewClient,
    ) -> impl Future<Output = Result<Option<Client>, StationServiceError>> + Send;
    fn delete_client(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<bool, StationServiceError>> + Send;
    fn list_client_stations(
        &self,
        client_id: i64,
    ) -> impl Future<Output = Result<Option<Vec<Station>>, StationServiceError>> + Send;

    // Stations
    fn create_station(
        &self,
        station: &NewStation,
    ) -> impl Future<Output = Result<Station, StationServiceError>> + Send;
    fn get_station(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Station>, StationServiceError>> + Send;
    fn update_station(
        &self,
        id: i64,
        station: &NewStation,
    ) -> impl Future<Output = Result<Option<Station>, StationServiceError>> + Send;
    fn delete_station(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<bool, StationServiceError>> + Send;

    // Pumps (backend "managePumps" resource)
    fn list_pumps(
        &self,
        station_id: i64,
    ) -> impl Future<Output = Result<Option<Vec<Pump>>, StationServiceError>> + Send;
    fn create_pump(
        &self,
        station_id: i64,
        pump: &NewPump,
    ) -> impl Future<Output = Result<Pump, StationServiceError>> + Send;
    fn update_pump(
        &self,
        station_id: i64,
        pump_id: i64,
        pump: &NewPump,
    ) -> impl Future<Output = Result<Option<Pump>, StationServiceError>> + Send;
    fn delete_pump(
        &self,
        station_id: i64,
        pump_id: i64,
    ) -> impl Future<Output = Result<bool, StationServiceError>> + Send;

    // Products
    fn list_products(
        &self,
        station_id: i64,
    ) -> impl Future<Output = Result<Option<Vec<Product>>, StationServiceError>> + Send;
    fn create_product(
        &self,
        station_id: i64,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Product, StationServiceError>> + Send;
    fn update_product(
        &self,
        station_id: i64,
        product_id: i64,
        product: &NewProduct,
    ) -> impl Future<Output = Result<Option<Product>, StationServiceError>> + Send;
    fn delete_product(
        &self,
        station_id: i64,
        product_id: i64,
    ) -> impl Future<Output = Result<bool, StationServiceError>> + Send;

    // Transactions + reports
    fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Vec<Transaction>, StationServiceError>> + Send;
    fn fetch_report(
        &self,
        station_id: i64,
        range: &DateRange,
    ) -> impl Future<Output = Result<Option<Vec<ReportRow>>, StationServiceError>> + Send;
}
