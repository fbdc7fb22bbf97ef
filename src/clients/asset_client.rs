//! Cliente HTTP para el host de imágenes
//!
//! Este módulo contiene el contrato del host de imágenes externo y su
//! implementación reqwest con subida multipart `{file, upload_preset}`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::dto::upload_dto::AssetUploadResponse;
use crate::utils::errors::{AppError, AppResult};

/// Fichero de avatar seleccionado para subir. A diferencia del adjunto
/// de la reserva, aquí sí viajan los bytes.
#[derive(Debug, Clone)]
pub struct AvatarFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Contrato del host de imágenes
#[async_trait]
pub trait AssetHost: Send + Sync {
    /// Subir la imagen; la respuesta expone la URL pública en `secure_url`
    async fn upload(&self, file: AvatarFile) -> AppResult<AssetUploadResponse>;
}

/// Cliente HTTP para el host de imágenes
pub struct AssetHostClient {
    pub client: Client,
    pub upload_url: String,
    pub upload_preset: String,
}

impl AssetHostClient {
    /// Crear nuevo cliente HTTP con endpoint y preset configurables
    pub fn new(upload_url: String, upload_preset: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            upload_url,
            upload_preset,
        })
    }
}

#[async_trait]
impl AssetHost for AssetHostClient {
    async fn upload(&self, file: AvatarFile) -> AppResult<AssetUploadResponse> {
        log::info!("📤 Subiendo avatar '{}' a {}", file.file_name, self.upload_url);

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ El host de imágenes respondió {}", status);
            return Err(AppError::UnexpectedStatus(status));
        }

        let upload: AssetUploadResponse = response.json().await?;
        log::info!("✅ Avatar disponible en {}", upload.secure_url);
        Ok(upload)
    }
}
