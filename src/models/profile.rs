//! Modelo de UserProfile
//!
//! Este módulo contiene el perfil canónico de la cuenta, su copia
//! editable y el estado del workflow de edición.
//!
//! El perfil de dominio no lleva contraseña: el backend la devuelve en
//! claro en sus respuestas, pero se descarta en la frontera del wire y
//! nunca vuelve a pasar por el formulario de edición.

use serde::Serialize;

/// Perfil canónico: el último estado bueno conocido del servidor,
/// direccionado de forma única por el email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Vacío o la URL devuelta por el host de imágenes, nunca una
    /// referencia local tras una subida exitosa.
    pub avatar: String,
}

/// Copia editable del perfil, re-sembrada desde el canónico al entrar
/// en edición y descartada al cancelar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableProfile {
    pub name: String,
    pub email: String,
    /// Solo se rellena si el usuario escribe una contraseña nueva;
    /// nunca se siembra desde el servidor.
    pub new_password: Option<String>,
    pub avatar: String,
}

impl From<&UserProfile> for EditableProfile {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            new_password: None,
            avatar: profile.avatar.clone(),
        }
    }
}

/// Campos editables del perfil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    NewPassword,
}

/// Estado del workflow de edición de perfil.
///
/// `Loading` cubre desde la activación hasta que la carga inicial
/// resuelve; un fallo de carga deja la vista en `Loading` indefinidamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileEditState {
    Loading,
    Viewing,
    Editing,
    Saving,
}
