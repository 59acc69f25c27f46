use tats_domain::station::NozzleIdentifier;

use crate::domain::repository::BackendPort;
use crate::domain::types::{NewPump, Nozzle, Pump};
use crate::error::StationServiceError;

/// Pump payload as submitted by the dashboard; the identifier mode arrives as
/// its wire string and is parsed here so bad values fail as a form error.
pub struct NewPumpInput {
    pub address: String,
    pub identifier: String,
    pub nozzles: Vec<Nozzle>,
}

fn validate_pump(input: NewPumpInput) -> Result<NewPump, StationServiceError> {
    if input.address.trim().is_empty() {
        return Err(StationServiceError::MissingData);
    }
    let identifier = NozzleIdentifier::parse(&input.identifier)
        .ok_or(StationServiceError::InvalidIdentifier)?;
    if input.nozzles.is_empty() {
        return Err(StationServiceError::InvalidNozzles);
    }
    if input
        .nozzles
        .iter()
        .any(|n| n.number <= 0 || n.product_id <= 0)
    {
        return Err(StationServiceError::InvalidNozzles);
    }
    Ok(NewPump {
        address: input.address,
        identifier,
        nozzles: input.nozzles,
    })
}

pub struct PumpsUseCase<B: BackendPort> {
    pub backend: B,
}

impl<B: BackendPort> PumpsUseCase<B> {
    pub async fn list(&self, station_id: i64) -> Result<Vec<Pump>, StationServiceError> {
        self.backend
            .list_pumps(station_id)
            .await?
            .ok_or(StationServiceError::StationNotFound)
    }

    pub async fn create(
        &self,
        station_id: i64,
        input: NewPumpInput,
    ) -> Result<Pump, StationServiceError> {
        let pump = validate_pump(input)?;
        self.backend.create_pump(station_id, &pump).await
    }

    pub async fn update(
        &self,
        station_id: i64,
        pump_id: i64,
        input: NewPumpInput,
    ) -> Result<Pump, StationServiceError> {
        let pump = validate_pump(input)?;
        self.backend
            .update_pump(station_id, pump_id, &pump)
            .await?
            .ok_or(StationServiceError::PumpNotFound)
    }

    pub async fn delete(&self, station_id: i64, pump_id: i64) -> Result<(), StationServiceError> {
        if !self.backend.delete_pump(station_id, pump_id).await? {
            return Err(StationServiceError::PumpNotFound);
        }
        Ok(())
    }
}
