use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use tats_core::health::{healthz, readyz};
use tats_core::middleware::request_id_layer;

use crate::domain::repository::BackendPort;
use crate::handlers::{
    clients::{
        create_client, delete_client, get_client, list_client_stations, list_clients,
        update_client,
    },
    products::{create_product, delete_product, list_products, update_product},
    pumps::{create_pump, delete_pump, list_pumps, update_pump},
    reports::station_report,
    stations::{create_station, delete_station, get_station, update_station},
    transactions::list_transactions,
};
use crate::state::AppState;

pub fn build_router<B>(state: AppState<B>) -> Router
where
    B: BackendPort + Clone + Send + Sync + 'static,
{
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Clients
        .route("/clients", get(list_clients::<B>))
        .route("/clients", post(create_client::<B>))
        .route("/clients/{id}", get(get_client::<B>))
        .route("/clients/{id}", put(update_client::<B>))
        .route("/clients/{id}", delete(delete_client::<B>))
        .route("/clients/{id}/stations", get(list_client_stations::<B>))
        // Stations
        .route("/stations", post(create_station::<B>))
        .route("/stations/{id}", get(get_station::<B>))
        .route("/stations/{id}", put(update_station::<B>))
        .route("/stations/{id}", delete(delete_station::<B>))
        // Pumps
        .route("/stations/{id}/pumps", get(list_pumps::<B>))
        .route("/stations/{id}/pumps", post(create_pump::<B>))
        .route("/stations/{id}/pumps/{pump_id}", put(update_pump::<B>))
        .route("/stations/{id}/pumps/{pump_id}", delete(delete_pump::<B>))
        // Products
        .route("/stations/{id}/products", get(list_products::<B>))
        .route("/stations/{id}/products", post(create_product::<B>))
        .route(
            "/stations/{id}/products/{product_id}",
            put(update_product::<B>),
        )
        .route(
            "/stations/{id}/products/{product_id}",
            delete(delete_product::<B>),
        )
        // Transactions + reports
        .route("/transactions", get(list_transactions::<B>))
        .route("/reports/{station_id}", get(station_report::<B>))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
