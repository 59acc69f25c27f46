use std::sync::{Arc, Mutex};

use axum_test::{TestRequest, TestServer};

use tats_domain::pagination::DateRange;
use tats_station::domain::repository::BackendPort;
use tats_station::domain::types::{
    Client, NewClient, NewProduct, NewPump, NewStation, Product, Pump, ReportRow, Station,
    Transaction, TransactionFilter,
};
use tats_station::error::StationServiceError;
use tats_station::router::build_router;
use tats_station::state::AppState;
use tats_testing::auth::MockAuth;

/// In-memory stand-in for the external REST backend.
///
/// `fail_with` simulates an upstream outage: when set, every call answers
/// with that upstream status.
#[derive(Clone, Default)]
pub struct MockBackend {
    pub clients: Arc<Mutex<Vec<Client>>>,
    pub stations: Arc<Mutex<Vec<Station>>>,
    pub pumps: Arc<Mutex<Vec<Pump>>>,
    pub products: Arc<Mutex<Vec<Product>>>,
    pub transactions: Arc<Mutex<Vec<Transaction>>>,
    pub reports: Arc<Mutex<Vec<(i64, ReportRow)>>>,
    next_id: Arc<Mutex<i64>>,
    pub fail_with: Arc<Mutex<Option<u16>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    pub fn fail_upstream(&self, status: u16) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    fn check_up(&self) -> Result<(), StationServiceError> {
        match *self.fail_with.lock().unwrap() {
            Some(status) => Err(StationServiceError::BackendRejected { status }),
            None => Ok(()),
        }
    }

    pub fn seed_station(&self, client_id: i64) -> Station {
        let station = Station {
            id: self.next_id(),
            client_id,
            name: "Estación Sur".to_owned(),
            address: "Av. Industrial 451".to_owned(),
        };
        self.stations.lock().unwrap().push(station.clone());
        station
    }

    pub fn seed_client(&self) -> Client {
        let client = Client {
            id: self.next_id(),
            name: "Grifo Norte SAC".to_owned(),
            document: "20451234567".to_owned(),
            email: Some("billing@norte.example".to_owned()),
            phone: None,
            address: None,
        };
        self.clients.lock().unwrap().push(client.clone());
        client
    }
}

impl BackendPort for MockBackend {
    async fn list_clients(&self) -> Result<Vec<Client>, StationServiceError> {
        self.check_up()?;
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn create_client(&self, client: &NewClient) -> Result<Client, StationServiceError> {
        self.check_up()?;
        let created = Client {
            id: self.next_id(),
            name: client.name.clone(),
            document: client.document.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
        };
        self.clients.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_client(&self, id: i64) -> Result<Option<Client>, StationServiceError> {
        self.check_up()?;
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn update_client(
        &self,
        id: i64,
        client: &NewClient,
    ) -> Result<Option<Client>, StationServiceError> {
        self.check_up()?;
        let mut clients = self.clients.lock().unwrap();
        let Some(existing) = clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        existing.name = client.name.clone();
        existing.document = client.document.clone();
        existing.email = client.email.clone();
        existing.phone = client.phone.clone();
        existing.address = client.address.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete_client(&self, id: i64) -> Result<bool, StationServiceError> {
        self.check_up()?;
        let mut clients = self.clients.lock().unwrap();
        let before = clients.len();
        clients.retain(|c| c.id != id);
        Ok(clients.len() < before)
    }

    async fn list_client_stations(
        &self,
        client_id: i64,
    ) -> Result<Option<Vec<Station>>, StationServiceError> {
        self.check_up()?;
        if !self.clients.lock().unwrap().iter().any(|c| c.id == client_id) {
            return Ok(None);
        }
        Ok(Some(
            self.stations
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.client_id == client_id)
                .cloned()
                .collect(),
        ))
    }

    async fn create_station(&self, station: &NewStation) -> Result<Station, StationServiceError> {
        self.check_up()?;
        let created = Station {
            id: self.next_id(),
            client_id: station.client_id,
            name: station.name.clone(),
            address: station.address.clone(),
        };
        self.stations.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_station(&self, id: i64) -> Result<Option<Station>, StationServiceError> {
        self.check_up()?;
        Ok(self
            .stations
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn update_station(
        &self,
        id: i64,
        station: &NewStation,
    ) -> Result<Option<Station>, StationServiceError> {
        self.check_up()?;
        let mut stations = self.stations.lock().unwrap();
        let Some(existing) = stations.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        existing.client_id = station.client_id;
        existing.name = station.name.clone();
        existing.address = station.address.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete_station(&self, id: i64) -> Result<bool, StationServiceError> {
        self.check_up()?;
        let mut stations = self.stations.lock().unwrap();
        let before = stations.len();
        stations.retain(|s| s.id != id);
        Ok(stations.len() < before)
    }

    async fn list_pumps(&self, station_id: i64) -> Result<Option<Vec<Pump>>, StationServiceError> {
        self.check_up()?;
        if !self.stations.lock().unwrap().iter().any(|s| s.id == station_id) {
            return Ok(None);
        }
        Ok(Some(
            self.pumps
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.station_id == station_id)
                .cloned()
                .collect(),
        ))
    }

    async fn create_pump(
        &self,
        station_id: i64,
        pump: &NewPump,
    ) -> Result<Pump, StationServiceError> {
        self.check_up()?;
        let created = Pump {
            id: self.next_id(),
            station_id,
            address: pump.address.clone(),
            identifier: pump.identifier,
            nozzles: pump.nozzles.clone(),
        };
        self.pumps.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_pump(
        &self,
        station_id: i64,
        pump_id: i64,
        pump: &NewPump,
    ) -> Result<Option<Pump>, StationServiceError> {
        self.check_up()?;
        let mut pumps = self.pumps.lock().unwrap();
        let Some(existing) = pumps
            .iter_mut()
            .find(|p| p.id == pump_id && p.station_id == station_id)
        else {
            return Ok(None);
        };
        existing.address = pump.address.clone();
        existing.identifier = pump.identifier;
        existing.nozzles = pump.nozzles.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete_pump(
        &self,
        station_id: i64,
        pump_id: i64,
    ) -> Result<bool, StationServiceError> {
        self.check_up()?;
        let mut pumps = self.pumps.lock().unwrap();
        let before = pumps.len();
        pumps.retain(|p| !(p.id == pump_id && p.station_id == station_id));
        Ok(pumps.len() < before)
    }

    async fn list_products(
        &self,
        station_id: i64,
    ) -> Result<Option<Vec<Product>>, StationServiceError> {
        self.check_up()?;
        if !self.stations.lock().unwrap().iter().any(|s| s.id == station_id) {
            return Ok(None);
        }
        Ok(Some(
            self.products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.station_id == station_id)
                .cloned()
                .collect(),
        ))
    }

    async fn create_product(
        &self,
        station_id: i64,
        product: &NewProduct,
    ) -> Result<Product, StationServiceError> {
        self.check_up()?;
        let created = Product {
            id: self.next_id(),
            station_id,
            name: product.name.clone(),
            unit_price: product.unit_price,
        };
        self.products.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        station_id: i64,
        product_id: i64,
        product: &NewProduct,
    ) -> Result<Option<Product>, StationServiceError> {
        self.check_up()?;
        let mut products = self.products.lock().unwrap();
        let Some(existing) = products
            .iter_mut()
            .find(|p| p.id == product_id && p.station_id == station_id)
        else {
            return Ok(None);
        };
        existing.name = product.name.clone();
        existing.unit_price = product.unit_price;
        Ok(Some(existing.clone()))
    }

    async fn delete_product(
        &self,
        station_id: i64,
        product_id: i64,
    ) -> Result<bool, StationServiceError> {
        self.check_up()?;
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| !(p.id == product_id && p.station_id == station_id));
        Ok(products.len() < before)
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StationServiceError> {
        self.check_up()?;
        let page = filter.page;
        let offset = ((page.page - 1) * page.per_page) as usize;
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.station_id.is_none_or(|id| t.station_id == id))
            .filter(|t| filter.range.from.is_none_or(|from| t.created_at >= from))
            .filter(|t| filter.range.to.is_none_or(|to| t.created_at <= to))
            .skip(offset)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }

    async fn fetch_report(
        &self,
        station_id: i64,
        _range: &DateRange,
    ) -> Result<Option<Vec<ReportRow>>, StationServiceError> {
        self.check_up()?;
        if !self.stations.lock().unwrap().iter().any(|s| s.id == station_id) {
            return Ok(None);
        }
        Ok(Some(
            self.reports
                .lock()
                .unwrap()
                .iter()
                .filter(|(id, _)| *id == station_id)
                .map(|(_, row)| row.clone())
                .collect(),
        ))
    }
}

/// Spin up the full router against a mock backend.
pub fn test_server(backend: MockBackend) -> TestServer {
    TestServer::new(build_router(AppState { backend })).unwrap()
}

/// Attach gateway identity headers to a request.
pub fn with_auth(mut request: TestRequest, auth: &MockAuth) -> TestRequest {
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    request
}
