//! DTOs del host de imágenes
//!
//! El host externo responde con la URL pública del recurso subido en
//! `secure_url`; esa URL se usa tal cual como avatar.

use serde::Deserialize;

/// Respuesta del host de imágenes a una subida multipart
#[derive(Debug, Clone, Deserialize)]
pub struct AssetUploadResponse {
    pub secure_url: String,
    #[serde(default)]
    pub public_id: Option<String>,
}
