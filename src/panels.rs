//! Colaboradores de la vista
//!
//! Este módulo declara los contratos de los paneles y servicios de UI
//! que los workflows consumen pero no implementan: el panel de ruta, el
//! panel de pago, la navegación y los avisos transitorios.

use std::sync::Arc;

/// Panel de visualización de ruta. Consume las direcciones de inicio y
/// fin; no devuelve ningún dato al controlador.
pub trait RoutePanel: Send + Sync {
    fn show_route(&self, start_address: &str, end_address: &str);
}

/// Panel de pago: opaco desde la perspectiva de este workflow.
pub trait PaymentPanel: Send + Sync {
    fn show(&self);
}

/// Navegación hacia flujos externos (sign-in).
pub trait Navigator: Send + Sync {
    fn to_sign_in(&self);
}

/// Avisos transitorios descartables (banners, snackbars).
pub trait NoticeHost: Send + Sync {
    fn show_notice(&self, message: &str);
}

/// Implementaciones por defecto que solo registran en el log; útiles
/// para el binario de wire-up y como colaborador nulo.
pub struct TracingRoutePanel;

impl RoutePanel for TracingRoutePanel {
    fn show_route(&self, start_address: &str, end_address: &str) {
        tracing::info!("🗺️ Panel de ruta visible: {} → {}", start_address, end_address);
    }
}

pub struct TracingPaymentPanel;

impl PaymentPanel for TracingPaymentPanel {
    fn show(&self) {
        tracing::info!("💳 Panel de pago visible");
    }
}

pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn to_sign_in(&self) {
        tracing::info!("➡️ Navegando al flujo de sign-in");
    }
}

pub struct TracingNoticeHost;

impl NoticeHost for TracingNoticeHost {
    fn show_notice(&self, message: &str) {
        tracing::info!("🔔 Aviso: {}", message);
    }
}

/// Conjunto de colaboradores de la vista de confirmación
#[derive(Clone)]
pub struct BookingPanels {
    pub route: Arc<dyn RoutePanel>,
    pub payment: Arc<dyn PaymentPanel>,
    pub notices: Arc<dyn NoticeHost>,
}

impl BookingPanels {
    /// Colaboradores que solo registran en el log
    pub fn tracing_only() -> Self {
        Self {
            route: Arc::new(TracingRoutePanel),
            payment: Arc::new(TracingPaymentPanel),
            notices: Arc::new(TracingNoticeHost),
        }
    }
}
