use crate::domain::repository::BackendPort;
use crate::domain::types::{NewStation, Station};
use crate::error::StationServiceError;

fn validate_station(station: &NewStation) -> Result<(), StationServiceError> {
    if station.name.trim().is_empty() || station.address.trim().is_empty() || station.client_id <= 0
    {
        return Err(StationServiceError::MissingData);
    }
    Ok(())
}

pub struct StationsUseCase<B: BackendPort> {
    pub backend: B,
}

impl<B: BackendPort> StationsUseCase<B> {
    pub async fn create(&self, input: NewStation) -> Result<Station, StationServiceError> {
        validate_station(&input)?;
        self.backend.create_station(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Station, StationServiceError> {
        self.backend
            .get_station(id)
            .await?
            .ok_or(StationServiceError::StationNotFound)
    }

    pub async fn update(&self, id: i64, input: NewStation) -> Result<Station, StationServiceError> {
        validate_station(&input)?;
        self.backend
            .update_station(id, &input)
            .await?
            .ok_or(StationServiceError::StationNotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StationServiceError> {
        if !self.backend.delete_station(id).await? {
            return Err(StationServiceError::StationNotFound);
        }
        Ok(())
    }
}
