//! DTOs del endpoint de perfil
//!
//! La respuesta del servidor incluye la contraseña almacenada; se
//! descarta aquí, en la frontera del wire, y el request de actualización
//! solo lleva contraseña cuando el usuario escribió una nueva.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{EditableProfile, UserProfile};

/// Cuerpo del perfil tal y como viaja por el wire
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    pub email: String,
    /// Presente en las respuestas del servidor; nunca se propaga al dominio
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub avatar: String,
}

impl From<ProfilePayload> for UserProfile {
    fn from(payload: ProfilePayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            avatar: payload.avatar,
        }
    }
}

/// Request de actualización de registro completo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    /// Solo presente si el usuario estableció una contraseña nueva;
    /// el servidor trata el campo ausente como "sin cambios".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_avatar_url")]
    pub avatar: String,
}

impl From<&EditableProfile> for UpdateProfileRequest {
    fn from(editable: &EditableProfile) -> Self {
        Self {
            name: editable.name.clone(),
            email: editable.email.clone(),
            password: editable.new_password.clone(),
            avatar: editable.avatar.clone(),
        }
    }
}

/// Request del endpoint dedicado de avatar
#[derive(Debug, Clone, Serialize)]
pub struct AvatarUpdateRequest {
    pub avatar: String,
}
