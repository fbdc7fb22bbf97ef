//! DTOs del endpoint de reservas
//!
//! Los nombres de campo del wire son los que el servicio de reservas
//! espera (`phoneNumber`, `veaddress`, `file`), no los del modelo.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::rental::RentalDraft;

/// Request de creación de reserva
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RentalDetailRequest {
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(rename = "phoneNumber")]
    #[validate(length(min = 1))]
    pub phone_number: String,

    #[validate(length(min = 1))]
    pub address: String,

    #[serde(rename = "veaddress")]
    #[validate(length(min = 1))]
    pub vehicle_address: String,

    /// Nombre del documento adjunto; nunca se envían los bytes
    #[serde(rename = "file")]
    pub file_name: Option<String>,
}

impl From<&RentalDraft> for RentalDetailRequest {
    fn from(draft: &RentalDraft) -> Self {
        Self {
            name: draft.renter_name.clone(),
            phone_number: draft.phone_number.clone(),
            address: draft.renter_address.clone(),
            vehicle_address: draft.vehicle_address.clone(),
            file_name: draft.attachment.as_ref().map(|a| a.file_name.clone()),
        }
    }
}

/// Respuesta del servicio al confirmar la reserva
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalConfirmation {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}
