//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: URLs de los
//! servicios remotos, el preset de subida del host de imágenes y los
//! parámetros de comportamiento de los workflows.

use std::env;
use std::time::Duration;

use crate::models::rental::ResubmitPolicy;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    // URLs de los servicios remotos
    pub rentals_base_url: String,
    pub profile_base_url: String,
    pub asset_upload_url: String,
    pub asset_upload_preset: String,
    /// Espera fija entre el aviso de sign-out y la limpieza de sesión
    pub logout_delay: Duration,
    /// Reintentos automáticos de un envío de reserva fallido
    /// (0 = reenvío explícito por el usuario)
    pub resubmit_attempts: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            rentals_base_url: env::var("RENTALS_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/rentals".to_string()),
            profile_base_url: env::var("PROFILE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/user".to_string()),
            asset_upload_url: env::var("ASSET_UPLOAD_URL").unwrap_or_else(|_| {
                "https://api.cloudinary.com/v1_1/your_cloud_name/image/upload".to_string()
            }),
            asset_upload_preset: env::var("ASSET_UPLOAD_PRESET")
                .unwrap_or_else(|_| "your_upload_preset".to_string()),
            logout_delay: Duration::from_millis(
                env::var("LOGOUT_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
            resubmit_attempts: env::var("BOOKING_RESUBMIT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Política de reenvío derivada de la configuración
    pub fn resubmit_policy(&self) -> ResubmitPolicy {
        if self.resubmit_attempts == 0 {
            ResubmitPolicy::Manual
        } else {
            ResubmitPolicy::Auto {
                max_attempts: self.resubmit_attempts,
            }
        }
    }
}
