//! Controlador de perfil de cuenta
//!
//! Este módulo contiene la máquina de estados del workflow de perfil:
//! carga por identificador de sesión, alternancia lectura/edición,
//! persistencia de cambios, reemplazo asíncrono de avatar y sign-out
//! retardado.
//!
//! Loading —fetch ok→ Viewing ⇄ Editing —save→ Saving —ok→ Viewing;
//! Saving —error→ Editing. Un fallo de carga deja Loading indefinido.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use validator::Validate;

use crate::clients::asset_client::{AssetHost, AvatarFile};
use crate::clients::profile_client::ProfileApi;
use crate::dto::profile_dto::{AvatarUpdateRequest, UpdateProfileRequest};
use crate::models::profile::{EditableProfile, ProfileEditState, ProfileField, UserProfile};
use crate::panels::{Navigator, NoticeHost};
use crate::state::SessionStore;
use crate::utils::errors::FailureRecord;

/// Aviso transitorio publicado al iniciar el sign-out
const LOGOUT_NOTICE: &str = "You are being logged out.";

struct ProfileInner {
    canonical: Option<UserProfile>,
    editable: Option<EditableProfile>,
    state: ProfileEditState,
    generation: u64,
    upload_generation: u64,
    active: bool,
    last_failure: Option<FailureRecord>,
}

/// Controlador del workflow de perfil de cuenta
pub struct ProfileController {
    api: Arc<dyn ProfileApi>,
    assets: Arc<dyn AssetHost>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    notices: Arc<dyn NoticeHost>,
    logout_delay: Duration,
    inner: Arc<RwLock<ProfileInner>>,
}

impl ProfileController {
    pub fn new(
        api: Arc<dyn ProfileApi>,
        assets: Arc<dyn AssetHost>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        notices: Arc<dyn NoticeHost>,
        logout_delay: Duration,
    ) -> Self {
        Self {
            api,
            assets,
            session,
            navigator,
            notices,
            logout_delay,
            inner: Arc::new(RwLock::new(ProfileInner {
                canonical: None,
                editable: None,
                state: ProfileEditState::Loading,
                generation: 0,
                upload_generation: 0,
                active: true,
                last_failure: None,
            })),
        }
    }

    /// Activar la vista: exige un identificador de sesión persistido.
    ///
    /// Sin identificador se navega al flujo de sign-in antes de emitir
    /// ninguna llamada de red. Con identificador se carga el perfil; un
    /// fallo de carga se registra y la vista queda en `Loading`
    /// indefinidamente, sin reintento ni superficie de error.
    pub async fn activate(&self) -> ProfileEditState {
        let email = match self.session.get().await {
            Some(email) => email,
            None => {
                tracing::info!("🔐 Sin identificador de sesión; navegando a sign-in");
                self.navigator.to_sign_in();
                return self.state().await;
            }
        };

        let generation = {
            let mut inner = self.inner.write().await;
            inner.state = ProfileEditState::Loading;
            inner.generation += 1;
            inner.generation
        };

        let result = self.api.fetch_profile(&email).await;

        let mut inner = self.inner.write().await;
        if !inner.active || inner.generation != generation {
            tracing::debug!("Carga de perfil descartada: vista desmontada o request superado");
            return inner.state;
        }

        match result {
            Ok(profile) => {
                tracing::info!(email = %profile.email, "✅ Perfil cargado");
                inner.editable = Some(EditableProfile::from(&profile));
                inner.canonical = Some(profile);
                inner.state = ProfileEditState::Viewing;
            }
            Err(error) => {
                // La vista queda en Loading: sin timeout, sin reintento
                let record = FailureRecord::new("fetch_profile", &error);
                tracing::error!(
                    correlation_id = %record.correlation_id,
                    "❌ Carga de perfil fallida: {}",
                    record.detail
                );
                inner.last_failure = Some(record);
            }
        }
        inner.state
    }

    /// Entrar en edición; la copia editable se re-siembra del canónico
    pub async fn begin_edit(&self) -> ProfileEditState {
        let mut inner = self.inner.write().await;
        if inner.state != ProfileEditState::Viewing {
            tracing::debug!(state = ?inner.state, "begin_edit ignorado fuera de Viewing");
            return inner.state;
        }
        if let Some(canonical) = &inner.canonical {
            inner.editable = Some(EditableProfile::from(canonical));
            inner.state = ProfileEditState::Editing;
        }
        inner.state
    }

    /// Abandonar la edición descartando la copia editable
    pub async fn cancel_edit(&self) -> ProfileEditState {
        let mut inner = self.inner.write().await;
        if inner.state != ProfileEditState::Editing {
            tracing::debug!(state = ?inner.state, "cancel_edit ignorado fuera de Editing");
            return inner.state;
        }
        if let Some(canonical) = &inner.canonical {
            inner.editable = Some(EditableProfile::from(canonical));
        }
        inner.state = ProfileEditState::Viewing;
        inner.state
    }

    /// Escribir un campo de la copia editable. La contraseña nueva vacía
    /// cuenta como "sin cambio".
    pub async fn update_field(&self, field: ProfileField, value: &str) {
        let mut inner = self.inner.write().await;
        if inner.state != ProfileEditState::Editing {
            tracing::debug!(state = ?inner.state, "Edición de perfil ignorada fuera de Editing");
            return;
        }
        if let Some(editable) = inner.editable.as_mut() {
            match field {
                ProfileField::Name => editable.name = value.to_string(),
                ProfileField::Email => editable.email = value.to_string(),
                ProfileField::NewPassword => {
                    editable.new_password = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    };
                }
            }
        }
    }

    /// Persistir la copia editable con un update de registro completo,
    /// con la clave del email canónico *actual*.
    ///
    /// Éxito: el canónico se reemplaza por la respuesta del servidor y
    /// el identificador de sesión se re-persiste desde su email. Fallo:
    /// se registra y el estado vuelve a `Editing` sin error visible.
    pub async fn save(&self) -> ProfileEditState {
        let (generation, key_email, request) = {
            let mut inner = self.inner.write().await;
            if inner.state != ProfileEditState::Editing {
                tracing::debug!(state = ?inner.state, "save ignorado fuera de Editing");
                return inner.state;
            }
            let (Some(editable), Some(canonical)) = (&inner.editable, &inner.canonical) else {
                tracing::error!("Estado inconsistente: Editing sin copia editable o canónico");
                return inner.state;
            };

            let request = UpdateProfileRequest::from(editable);
            if let Err(errors) = request.validate() {
                // Error local: bloquea el request, no hay llamada de red
                tracing::debug!("📝 Perfil inválido, no se envía: {}", errors);
                return inner.state;
            }

            let key_email = canonical.email.clone();
            inner.state = ProfileEditState::Saving;
            inner.generation += 1;
            (inner.generation, key_email, request)
        };

        let result = self.api.update_profile(&key_email, &request).await;

        let mut inner = self.inner.write().await;
        if !inner.active || inner.generation != generation {
            tracing::debug!("Guardado de perfil descartado: vista desmontada o request superado");
            return inner.state;
        }

        match result {
            Ok(updated) => {
                let new_identifier = updated.email.clone();
                inner.editable = Some(EditableProfile::from(&updated));
                inner.canonical = Some(updated);
                inner.state = ProfileEditState::Viewing;
                drop(inner);

                self.session.persist(new_identifier).await;
                tracing::info!("✅ Perfil guardado y sesión re-persistida");
                ProfileEditState::Viewing
            }
            Err(error) => {
                let record = FailureRecord::new("update_profile", &error);
                tracing::error!(
                    correlation_id = %record.correlation_id,
                    "❌ Guardado de perfil fallido: {}",
                    record.detail
                );
                inner.last_failure = Some(record);
                inner.state = ProfileEditState::Editing;
                ProfileEditState::Editing
            }
        }
    }

    /// Subida asíncrona de avatar, independiente de `save()`.
    ///
    /// Éxito: la URL devuelta se fusiona solo en la copia editable,
    /// visible pero no persistida hasta un `save()` o `commit_avatar()`
    /// explícito. Fallo: el avatar queda intacto y solo se registra.
    pub async fn upload_avatar(&self, file: AvatarFile) {
        let generation = {
            let mut inner = self.inner.write().await;
            if inner.editable.is_none() {
                tracing::debug!("Subida de avatar ignorada: el perfil aún no cargó");
                return;
            }
            inner.upload_generation += 1;
            inner.upload_generation
        };

        let result = self.assets.upload(file).await;

        let mut inner = self.inner.write().await;
        if !inner.active || inner.upload_generation != generation {
            tracing::debug!("Subida de avatar descartada: vista desmontada o subida superada");
            return;
        }

        match result {
            Ok(upload) => {
                if let Some(editable) = inner.editable.as_mut() {
                    editable.avatar = upload.secure_url;
                    tracing::info!("🖼️ Avatar reemplazado en la copia editable");
                }
            }
            Err(error) => {
                let record = FailureRecord::new("upload_avatar", &error);
                tracing::error!(
                    correlation_id = %record.correlation_id,
                    "❌ Subida de avatar fallida: {}",
                    record.detail
                );
                inner.last_failure = Some(record);
            }
        }
    }

    /// Persistir únicamente la URL de avatar actual de la copia
    /// editable, sin un save de registro completo.
    pub async fn commit_avatar(&self) -> ProfileEditState {
        let (generation, key_email, request) = {
            let mut inner = self.inner.write().await;
            let (Some(editable), Some(canonical)) = (&inner.editable, &inner.canonical) else {
                tracing::debug!("commit_avatar ignorado: el perfil aún no cargó");
                return inner.state;
            };
            let request = AvatarUpdateRequest {
                avatar: editable.avatar.clone(),
            };
            let key_email = canonical.email.clone();
            inner.generation += 1;
            (inner.generation, key_email, request)
        };

        let result = self.api.update_avatar(&key_email, &request).await;

        let mut inner = self.inner.write().await;
        if !inner.active || inner.generation != generation {
            tracing::debug!("Persistencia de avatar descartada: vista desmontada o superada");
            return inner.state;
        }

        match result {
            Ok(updated) => {
                // El canónico adopta la respuesta; la copia editable
                // conserva el resto de ediciones en curso
                if let Some(editable) = inner.editable.as_mut() {
                    editable.avatar = updated.avatar.clone();
                }
                inner.canonical = Some(updated);
                tracing::info!("✅ Avatar persistido");
            }
            Err(error) => {
                let record = FailureRecord::new("update_avatar", &error);
                tracing::error!(
                    correlation_id = %record.correlation_id,
                    "❌ Persistencia de avatar fallida: {}",
                    record.detail
                );
                inner.last_failure = Some(record);
            }
        }
        inner.state
    }

    /// Sign-out retardado: aviso transitorio, espera fija, limpieza del
    /// identificador y solo después navegación a sign-in, de forma que
    /// el destino observe siempre la sesión ya limpia.
    pub async fn logout(&self) {
        tracing::info!("👋 Cerrando sesión");
        self.notices.show_notice(LOGOUT_NOTICE);
        tokio::time::sleep(self.logout_delay).await;
        self.session.clear().await;
        self.navigator.to_sign_in();
    }

    /// Marcar la vista como desmontada; las finalizaciones tardías no
    /// deben mutar estado después de esto.
    pub async fn teardown(&self) {
        let mut inner = self.inner.write().await;
        inner.active = false;
        tracing::debug!("Vista de perfil desmontada");
    }

    pub async fn state(&self) -> ProfileEditState {
        self.inner.read().await.state
    }

    pub async fn canonical(&self) -> Option<UserProfile> {
        self.inner.read().await.canonical.clone()
    }

    pub async fn editable(&self) -> Option<EditableProfile> {
        self.inner.read().await.editable.clone()
    }

    pub async fn last_failure(&self) -> Option<FailureRecord> {
        self.inner.read().await.last_failure.clone()
    }
}
