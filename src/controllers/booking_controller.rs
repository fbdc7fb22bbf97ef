//! Controlador de confirmación de reserva
//!
//! Este módulo contiene la máquina de estados del workflow de
//! confirmación: edición del borrador, validación local, envío al
//! servicio de reservas y revelado de los paneles de ruta y pago.
//!
//! Editing —submit(válido)→ Submitting —ok→ Confirmed (terminal);
//! Submitting —error→ Failed, con los campos todavía editables.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::rental_client::RentalApi;
use crate::dto::rental_dto::{RentalConfirmation, RentalDetailRequest};
use crate::models::rental::{
    Attachment, BookingState, RentalDraft, RentalField, RentalFieldFlags, ResubmitPolicy,
};
use crate::panels::BookingPanels;
use crate::utils::errors::{AppResult, FailureRecord};

/// Aviso que el workflow publica al confirmar la reserva
const CONFIRMED_NOTICE: &str = "The Renting has been confirmed.";

struct BookingInner {
    draft: RentalDraft,
    flags: RentalFieldFlags,
    state: BookingState,
    generation: u64,
    active: bool,
    last_failure: Option<FailureRecord>,
}

/// Controlador del workflow de confirmación de reserva
pub struct BookingConfirmationController {
    api: Arc<dyn RentalApi>,
    panels: BookingPanels,
    resubmit: ResubmitPolicy,
    inner: Arc<RwLock<BookingInner>>,
}

impl BookingConfirmationController {
    /// Crear el controlador con un borrador vacío
    pub fn new(api: Arc<dyn RentalApi>, panels: BookingPanels, resubmit: ResubmitPolicy) -> Self {
        Self::with_draft(api, panels, resubmit, RentalDraft::new())
    }

    /// Crear el controlador con un borrador pre-sembrado (la dirección
    /// del vehículo llega en el estado de navegación)
    pub fn with_draft(
        api: Arc<dyn RentalApi>,
        panels: BookingPanels,
        resubmit: ResubmitPolicy,
        draft: RentalDraft,
    ) -> Self {
        Self {
            api,
            panels,
            resubmit,
            inner: Arc::new(RwLock::new(BookingInner {
                draft,
                flags: RentalFieldFlags::default(),
                state: BookingState::Editing,
                generation: 0,
                active: true,
                last_failure: None,
            })),
        }
    }

    /// Escribir un campo del borrador y limpiar su flag de faltante.
    /// Sin efecto de red; ignorado una vez confirmada la reserva.
    pub async fn update_field(&self, field: RentalField, value: &str) {
        let mut inner = self.inner.write().await;
        if inner.state == BookingState::Confirmed {
            tracing::debug!("Edición ignorada: la reserva ya está confirmada");
            return;
        }
        match field {
            RentalField::RenterName => inner.draft.renter_name = value.to_string(),
            RentalField::PhoneNumber => inner.draft.phone_number = value.to_string(),
            RentalField::RenterAddress => inner.draft.renter_address = value.to_string(),
            RentalField::VehicleAddress => inner.draft.vehicle_address = value.to_string(),
        }
        inner.flags.clear(field);
        if inner.state == BookingState::Failed {
            inner.state = BookingState::Editing;
        }
    }

    /// Guardar la referencia al documento seleccionado; solo su nombre
    /// se transmite después, nunca los bytes.
    pub async fn attach_file(&self, attachment: Attachment) {
        let mut inner = self.inner.write().await;
        if inner.state == BookingState::Confirmed {
            tracing::debug!("Adjunto ignorado: la reserva ya está confirmada");
            return;
        }
        inner.draft.attachment = Some(attachment);
    }

    /// Validar y enviar el borrador al servicio de reservas.
    ///
    /// Con algún campo obligatorio vacío no se emite ninguna llamada de
    /// red: los flags quedan levantados y el estado en `Editing`. No hay
    /// guard de in-flight: un segundo `submit()` antes de que resuelva el
    /// primero emite un request duplicado, y el token de generación
    /// descarta la finalización superada.
    pub async fn submit(&self) -> BookingState {
        let (generation, request) = {
            let mut inner = self.inner.write().await;
            if inner.state == BookingState::Confirmed {
                tracing::debug!("Submit ignorado: la reserva ya está confirmada");
                return inner.state;
            }

            inner.flags = RentalFieldFlags::recompute(&inner.draft);
            if inner.flags.any_missing() {
                tracing::debug!(flags = ?inner.flags, "📝 Campos obligatorios sin rellenar");
                inner.state = BookingState::Editing;
                return inner.state;
            }

            inner.state = BookingState::Submitting;
            inner.generation += 1;
            (inner.generation, RentalDetailRequest::from(&inner.draft))
        };

        let result = self.send_with_policy(&request).await;

        let mut inner = self.inner.write().await;
        if !inner.active {
            tracing::debug!("Finalización descartada: la vista ya fue desmontada");
            return inner.state;
        }
        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "Finalización descartada: request superado por otro envío"
            );
            return inner.state;
        }

        match result {
            Ok(confirmation) => {
                inner.state = BookingState::Confirmed;
                let start = inner.draft.renter_address.clone();
                let end = inner.draft.vehicle_address.clone();
                drop(inner);

                tracing::info!(id = confirmation.id, "✅ Reserva confirmada");
                self.panels.route.show_route(&start, &end);
                self.panels.payment.show();
                self.panels.notices.show_notice(CONFIRMED_NOTICE);
                BookingState::Confirmed
            }
            Err(error) => {
                // Solo registro de diagnóstico; el usuario no ve mensaje
                let record = FailureRecord::new("create_rental", &error);
                tracing::error!(
                    correlation_id = %record.correlation_id,
                    "❌ Envío de reserva fallido: {}",
                    record.detail
                );
                inner.last_failure = Some(record);
                inner.state = BookingState::Failed;
                BookingState::Failed
            }
        }
    }

    /// Emitir el request respetando la política de reenvío configurada
    async fn send_with_policy(
        &self,
        request: &RentalDetailRequest,
    ) -> AppResult<RentalConfirmation> {
        let attempts = self.resubmit.attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.api.create_rental(request).await {
                Ok(confirmation) => return Ok(confirmation),
                Err(error) if attempt < attempts => {
                    tracing::warn!(
                        attempt,
                        attempts,
                        "🔁 Reintentando envío de reserva: {}",
                        error
                    );
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Marcar la vista como desmontada; las finalizaciones tardías no
    /// deben mutar estado ni revelar paneles después de esto.
    pub async fn teardown(&self) {
        let mut inner = self.inner.write().await;
        inner.active = false;
        tracing::debug!("Vista de confirmación desmontada");
    }

    pub async fn state(&self) -> BookingState {
        self.inner.read().await.state
    }

    pub async fn draft(&self) -> RentalDraft {
        self.inner.read().await.draft.clone()
    }

    pub async fn validation(&self) -> RentalFieldFlags {
        self.inner.read().await.flags
    }

    pub async fn last_failure(&self) -> Option<FailureRecord> {
        self.inner.read().await.last_failure.clone()
    }
}
