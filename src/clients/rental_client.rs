//! Cliente HTTP para el servicio de reservas
//!
//! Este módulo contiene el contrato del servicio de reservas y su
//! implementación reqwest contra el endpoint de creación.

use async_trait::async_trait;
use reqwest::Client;

use crate::dto::rental_dto::{RentalConfirmation, RentalDetailRequest};
use crate::utils::errors::{AppError, AppResult};

/// Contrato del servicio de reservas
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// Crear una reserva; cualquier respuesta 2xx es éxito
    async fn create_rental(&self, request: &RentalDetailRequest) -> AppResult<RentalConfirmation>;
}

/// Cliente HTTP para el servicio de reservas
pub struct RentalApiClient {
    pub client: Client,
    pub base_url: String,
}

impl RentalApiClient {
    /// Crear nuevo cliente HTTP con URL base configurable
    pub fn new(base_url: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl RentalApi for RentalApiClient {
    async fn create_rental(&self, request: &RentalDetailRequest) -> AppResult<RentalConfirmation> {
        let url = format!("{}/save", self.base_url);
        log::info!("📨 Enviando reserva a {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ El servicio de reservas respondió {}", status);
            return Err(AppError::UnexpectedStatus(status));
        }

        let confirmation: RentalConfirmation = response.json().await?;
        log::info!("✅ Reserva confirmada con id {}", confirmation.id);
        Ok(confirmation)
    }
}
