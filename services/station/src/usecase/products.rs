use crate::domain::repository::BackendPort;
use crate::domain::types::{NewProduct, Product};
use crate::error::StationServiceError;

fn validate_product(product: &NewProduct) -> Result<(), StationServiceError> {
    if product.name.trim().is_empty() {
        return Err(StationServiceError::MissingData);
    }
    if !product.unit_price.is_finite() || product.unit_price < 0.0 {
        return Err(StationServiceError::InvalidPrice);
    }
    Ok(())
}

pub struct ProductsUseCase<B: BackendPort> {
    pub backend: B,
}

impl<B: BackendPort> ProductsUseCase<B> {
    pub async fn list(&self, station_id: i64) -> Result<Vec<Product>, StationServiceError> {
        self.backend
            .list_products(station_id)
            .await?
            .ok_or(StationServiceError::StationNotFound)
    }

    pub async fn create(
        &self,
        station_id: i64,
        input: NewProduct,
    ) -> Result<Product, StationServiceError> {
        validate_product(&input)?;
        self.backend.create_product(station_id, &input).await
    }

    pub async fn update(
        &self,
        station_id: i64,
        product_id: i64,
        input: NewProduct,
    ) -> Result<Product, StationServiceError> {
        validate_product(&input)?;
        self.backend
            .update_product(station_id, product_id, &input)
            .await?
            .ok_or(StationServiceError::ProductNotFound)
    }

    pub async fn delete(
        &self,
        station_id: i64,
        product_id: i64,
    ) -> Result<(), StationServiceError> {
        if !self.backend.delete_product(station_id, product_id).await? {
            return Err(StationServiceError::ProductNotFound);
        }
        Ok(())
    }
}
