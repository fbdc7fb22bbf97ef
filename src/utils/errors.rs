//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema y los
//! registros de diagnóstico que los workflows producen cuando una
//! operación remota falla sin superficie de error para el usuario.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Registro de diagnóstico de una operación remota fallida.
/// El usuario no ve ningún mensaje; esto es lo único que queda.
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub correlation_id: Uuid,
    pub operation: &'static str,
    pub detail: String,
    pub occurred_at: DateTime<Utc>,
}

impl FailureRecord {
    pub fn new(operation: &'static str, error: &AppError) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            operation,
            detail: error.to_string(),
            occurred_at: Utc::now(),
        }
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, key: &str) -> AppError {
    AppError::NotFound(format!("{} with key '{}' not found", resource, key))
}
