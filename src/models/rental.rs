//! Modelo de RentalDraft
//!
//! Este módulo contiene el borrador de reserva en curso, sus flags de
//! validación por campo y el estado del workflow de confirmación.

use serde::{Deserialize, Serialize};

use crate::utils::validation::validate_not_empty;

/// Referencia al documento de identidad seleccionado por el arrendatario.
/// Solo se transmite el nombre del fichero, nunca sus bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// Borrador de reserva previo a la confirmación
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalDraft {
    pub renter_name: String,
    pub phone_number: String,
    pub renter_address: String,
    pub vehicle_address: String,
    pub attachment: Option<Attachment>,
}

impl RentalDraft {
    /// Borrador vacío, creado al entrar al workflow
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrador pre-sembrado con la dirección del vehículo
    /// (llega en el estado de navegación desde la página del vehículo)
    pub fn with_vehicle_address(vehicle_address: impl Into<String>) -> Self {
        Self {
            vehicle_address: vehicle_address.into(),
            ..Self::default()
        }
    }

    /// El borrador es enviable si y solo si los cuatro campos
    /// obligatorios son no vacíos.
    pub fn is_submittable(&self) -> bool {
        !RentalFieldFlags::recompute(self).any_missing()
    }
}

/// Campos obligatorios del borrador de reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalField {
    RenterName,
    PhoneNumber,
    RenterAddress,
    VehicleAddress,
}

/// Flags de valor-faltante por campo, recalculados en cada intento de
/// envío; la edición de un campo limpia únicamente su flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RentalFieldFlags {
    pub renter_name: bool,
    pub phone_number: bool,
    pub renter_address: bool,
    pub vehicle_address: bool,
}

impl RentalFieldFlags {
    /// Recalcular los flags sobre todos los campos obligatorios
    pub fn recompute(draft: &RentalDraft) -> Self {
        Self {
            renter_name: validate_not_empty(&draft.renter_name).is_err(),
            phone_number: validate_not_empty(&draft.phone_number).is_err(),
            renter_address: validate_not_empty(&draft.renter_address).is_err(),
            vehicle_address: validate_not_empty(&draft.vehicle_address).is_err(),
        }
    }

    pub fn any_missing(&self) -> bool {
        self.renter_name || self.phone_number || self.renter_address || self.vehicle_address
    }

    pub fn clear(&mut self, field: RentalField) {
        match field {
            RentalField::RenterName => self.renter_name = false,
            RentalField::PhoneNumber => self.phone_number = false,
            RentalField::RenterAddress => self.renter_address = false,
            RentalField::VehicleAddress => self.vehicle_address = false,
        }
    }

    pub fn is_missing(&self, field: RentalField) -> bool {
        match field {
            RentalField::RenterName => self.renter_name,
            RentalField::PhoneNumber => self.phone_number,
            RentalField::RenterAddress => self.renter_address,
            RentalField::VehicleAddress => self.vehicle_address,
        }
    }
}

/// Estado del workflow de confirmación de reserva.
///
/// `Confirmed` es terminal para la vista; `Failed` marca un envío
/// fallido con los campos todavía editables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingState {
    Editing,
    Submitting,
    Confirmed,
    Failed,
}

/// Política de reenvío ante un fallo de transporte/HTTP.
///
/// La pregunta abierta del comportamiento original (¿auto-reintento o
/// reenvío explícito?) se resuelve como configuración; por defecto el
/// reenvío es explícito.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResubmitPolicy {
    Manual,
    Auto { max_attempts: u32 },
}

impl Default for ResubmitPolicy {
    fn default() -> Self {
        ResubmitPolicy::Manual
    }
}

impl ResubmitPolicy {
    /// Número total de intentos que ejecuta un `submit()`
    pub fn attempts(&self) -> u32 {
        match self {
            ResubmitPolicy::Manual => 1,
            ResubmitPolicy::Auto { max_attempts } => 1 + max_attempts,
        }
    }
}
