use crate::domain::repository::BackendPort;
use crate::domain::types::{Client, NewClient, Station};
use crate::error::StationServiceError;

/// Form-level validation; everything else is the backend's problem.
fn validate_client(client: &NewClient) -> Result<(), StationServiceError> {
    if client.name.trim().is_empty() || client.document.trim().is_empty() {
        return Err(StationServiceError::MissingData);
    }
    if let Some(ref email) = client.email {
        if !email.contains('@') || email.trim().is_empty() {
            return Err(StationServiceError::InvalidEmail);
        }
    }
    Ok(())
}

pub struct ClientsUseCase<B: BackendPort> {
    pub backend: B,
}

impl<B: BackendPort> ClientsUseCase<B> {
    pub async fn list(&self) -> Result<Vec<Client>, StationServiceError> {
        self.backend.list_clients().await
    }

    pub async fn create(&self, input: NewClient) -> Result<Client, StationServiceError> {
        validate_client(&input)?;
        self.backend.create_client(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Client, StationServiceError> {
        self.backend
            .get_client(id)
            .await?
            .ok_or(StationServiceError::ClientNotFound)
    }

    pub async fn update(&self, id: i64, input: NewClient) -> Result<Client, StationServiceError> {
        validate_client(&input)?;
        self.backend
            .update_client(id, &input)
            .await?
            .ok_or(StationServiceError::ClientNotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StationServiceError> {
        if !self.backend.delete_client(id).await? {
            return Err(StationServiceError::ClientNotFound);
        }
        Ok(())
    }

    pub async fn stations(&self, id: i64) -> Result<Vec<Station>, StationServiceError> {
        self.backend
            .list_client_stations(id)
            .await?
            .ok_or(StationServiceError::ClientNotFound)
    }
}
