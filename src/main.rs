use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use tracing::{error, info};

use rental_booking::clients::rental_client::RentalApiClient;
use rental_booking::config::environment::EnvironmentConfig;
use rental_booking::controllers::booking_controller::BookingConfirmationController;
use rental_booking::models::rental::{Attachment, BookingState, RentalDraft};
use rental_booking::panels::BookingPanels;

/// Borrador de reserva leído del fichero JSON pasado por argumento
#[derive(Debug, Deserialize)]
struct DraftFile {
    renter_name: String,
    phone_number: String,
    renter_address: String,
    vehicle_address: String,
    #[serde(default)]
    attachment_name: Option<String>,
}

impl From<DraftFile> for RentalDraft {
    fn from(file: DraftFile) -> Self {
        RentalDraft {
            renter_name: file.renter_name,
            phone_number: file.phone_number,
            renter_address: file.renter_address,
            vehicle_address: file.vehicle_address,
            attachment: file.attachment_name.map(Attachment::new),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Rental Booking - Confirmación de reserva");
    info!("===========================================");

    let config = EnvironmentConfig::default();
    info!("🌐 Servicio de reservas: {}", config.rentals_base_url);

    let draft_path = std::env::args()
        .nth(1)
        .context("Uso: rental_booking <borrador.json>")?;

    let raw = std::fs::read_to_string(&draft_path)
        .with_context(|| format!("No se pudo leer el borrador '{}'", draft_path))?;
    let draft: DraftFile =
        serde_json::from_str(&raw).context("El borrador no es un JSON válido")?;

    let api = Arc::new(
        RentalApiClient::new(config.rentals_base_url.clone())
            .context("No se pudo crear el cliente de reservas")?,
    );

    let controller = BookingConfirmationController::with_draft(
        api,
        BookingPanels::tracing_only(),
        config.resubmit_policy(),
        RentalDraft::from(draft),
    );

    match controller.submit().await {
        BookingState::Confirmed => {
            info!("✅ Reserva confirmada; paneles de ruta y pago visibles");
        }
        BookingState::Editing => {
            let flags = controller.validation().await;
            error!("📝 Borrador incompleto, no se envió nada: {:?}", flags);
        }
        BookingState::Failed => {
            if let Some(failure) = controller.last_failure().await {
                error!(
                    correlation_id = %failure.correlation_id,
                    "❌ Envío fallido: {}",
                    failure.detail
                );
            }
        }
        BookingState::Submitting => {
            error!("⏳ El envío quedó sin resolución");
        }
    }

    Ok(())
}
