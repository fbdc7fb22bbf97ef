//! Estado de sesión compartido
//!
//! Este módulo define la capacidad de sesión que se pasa explícitamente
//! a los dos controladores en lugar de leerse de un almacén ambiental.
//! Ambos controladores la leen; solo el flujo de sign-in/out la escribe.

use std::sync::Arc;
use tokio::sync::RwLock;

/// Identificador de sesión persistido: la clave (con forma de email) que
/// liga la sesión de UI activa con un registro de cuenta almacenado.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    /// Almacén sin sesión activa
    pub fn new() -> Self {
        Self::default()
    }

    /// Almacén sembrado con un identificador ya persistido
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(identifier.into()))),
        }
    }

    /// Leer el identificador de sesión actual
    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }

    /// Lectura no bloqueante, para colaboradores síncronos (el destino
    /// de una navegación comprueba aquí si la sesión sigue viva)
    pub fn try_get(&self) -> Option<String> {
        self.inner
            .try_read()
            .ok()
            .and_then(|identifier| identifier.clone())
    }

    /// Re-persistir el identificador (tras un save exitoso, el email de
    /// la respuesta del servidor pasa a ser la clave de sesión)
    pub async fn persist(&self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        tracing::debug!("💾 Persistiendo identificador de sesión: {}", identifier);
        *self.inner.write().await = Some(identifier);
    }

    /// Limpiar la sesión; el destino de la navegación posterior debe
    /// observar siempre el identificador ya limpio.
    pub async fn clear(&self) {
        tracing::debug!("🧹 Limpiando identificador de sesión");
        *self.inner.write().await = None;
    }
}
