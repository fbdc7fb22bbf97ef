//! Cliente HTTP para el servicio de perfil
//!
//! Este módulo contiene el contrato del servicio de perfil y su
//! implementación reqwest contra los endpoints por email.

use async_trait::async_trait;
use reqwest::Client;

use crate::dto::profile_dto::{AvatarUpdateRequest, ProfilePayload, UpdateProfileRequest};
use crate::models::profile::UserProfile;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Contrato del servicio de perfil
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Leer el perfil por su clave de email; no-2xx es condición de no-encontrado
    async fn fetch_profile(&self, email: &str) -> AppResult<UserProfile>;

    /// Actualización de registro completo, con la clave de email *actual*
    async fn update_profile(
        &self,
        email: &str,
        request: &UpdateProfileRequest,
    ) -> AppResult<UserProfile>;

    /// Persistir solo la URL del avatar, sin tocar el resto del registro
    async fn update_avatar(&self, email: &str, request: &AvatarUpdateRequest)
        -> AppResult<UserProfile>;
}

/// Cliente HTTP para el servicio de perfil
pub struct ProfileApiClient {
    pub client: Client,
    pub base_url: String,
}

impl ProfileApiClient {
    /// Crear nuevo cliente HTTP con URL base configurable
    pub fn new(base_url: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn profile_url(&self, email: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(email))
    }

    fn avatar_url(&self, email: &str) -> String {
        format!("{}/image/{}", self.base_url, urlencoding::encode(email))
    }

    async fn decode_profile(&self, response: reqwest::Response) -> AppResult<UserProfile> {
        let payload: ProfilePayload = response.json().await?;
        Ok(UserProfile::from(payload))
    }
}

#[async_trait]
impl ProfileApi for ProfileApiClient {
    async fn fetch_profile(&self, email: &str) -> AppResult<UserProfile> {
        let url = self.profile_url(email);
        log::info!("🔍 Cargando perfil desde {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ Perfil no encontrado para '{}' ({})", email, status);
            return Err(not_found_error("profile", email));
        }

        self.decode_profile(response).await
    }

    async fn update_profile(
        &self,
        email: &str,
        request: &UpdateProfileRequest,
    ) -> AppResult<UserProfile> {
        let url = self.profile_url(email);
        log::info!("📤 Actualizando perfil en {}", url);

        let response = self
            .client
            .put(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ La actualización de perfil respondió {}", status);
            return Err(AppError::UnexpectedStatus(status));
        }

        self.decode_profile(response).await
    }

    async fn update_avatar(
        &self,
        email: &str,
        request: &AvatarUpdateRequest,
    ) -> AppResult<UserProfile> {
        let url = self.avatar_url(email);
        log::info!("🖼️ Persistiendo avatar en {}", url);

        let response = self
            .client
            .put(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ La actualización de avatar respondió {}", status);
            return Err(AppError::UnexpectedStatus(status));
        }

        self.decode_profile(response).await
    }
}
