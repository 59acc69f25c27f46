pub mod clients;
pub mod products;
pub mod pumps;
pub mod reports;
pub mod stations;
pub mod transactions;
