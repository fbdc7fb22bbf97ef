//! Tests del workflow de perfil de cuenta contra fakes que registran
//! cada request, cada subida de avatar y cada navegación.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use rental_booking::clients::asset_client::{AssetHost, AvatarFile};
use rental_booking::clients::profile_client::ProfileApi;
use rental_booking::controllers::profile_controller::ProfileController;
use rental_booking::dto::profile_dto::{AvatarUpdateRequest, UpdateProfileRequest};
use rental_booking::dto::upload_dto::AssetUploadResponse;
use rental_booking::models::profile::{ProfileEditState, ProfileField, UserProfile};
use rental_booking::panels::{Navigator, NoticeHost};
use rental_booking::state::SessionStore;
use rental_booking::utils::errors::{AppError, AppResult};

fn canonical_profile() -> UserProfile {
    UserProfile {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        avatar: "https://res.example.com/ana.jpg".to_string(),
    }
}

/// Servicio de perfil falso: sirve un perfil fijo y, en los updates,
/// responde con el registro actualizado como haría el servidor.
struct FakeProfileApi {
    profile: Option<UserProfile>,
    fail_updates: bool,
    fetches: Mutex<Vec<String>>,
    updates: Mutex<Vec<(String, UpdateProfileRequest)>>,
    avatar_updates: Mutex<Vec<(String, String)>>,
}

impl FakeProfileApi {
    fn serving(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
            fail_updates: false,
            fetches: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            avatar_updates: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            profile: None,
            fail_updates: true,
            fetches: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            avatar_updates: Mutex::new(Vec::new()),
        }
    }

    fn with_failing_updates(profile: UserProfile) -> Self {
        Self {
            fail_updates: true,
            ..Self::serving(profile)
        }
    }
}

#[async_trait]
impl ProfileApi for FakeProfileApi {
    async fn fetch_profile(&self, email: &str) -> AppResult<UserProfile> {
        self.fetches.lock().unwrap().push(email.to_string());
        self.profile
            .clone()
            .ok_or_else(|| AppError::NotFound(format!("profile with key '{}' not found", email)))
    }

    async fn update_profile(
        &self,
        email: &str,
        request: &UpdateProfileRequest,
    ) -> AppResult<UserProfile> {
        self.updates
            .lock()
            .unwrap()
            .push((email.to_string(), request.clone()));
        if self.fail_updates {
            return Err(AppError::ExternalApi("fallo simulado".to_string()));
        }
        Ok(UserProfile {
            name: request.name.clone(),
            email: request.email.clone(),
            avatar: request.avatar.clone(),
        })
    }

    async fn update_avatar(
        &self,
        email: &str,
        request: &AvatarUpdateRequest,
    ) -> AppResult<UserProfile> {
        self.avatar_updates
            .lock()
            .unwrap()
            .push((email.to_string(), request.avatar.clone()));
        if self.fail_updates {
            return Err(AppError::ExternalApi("fallo simulado".to_string()));
        }
        let mut profile = self.profile.clone().expect("perfil sembrado");
        profile.avatar = request.avatar.clone();
        Ok(profile)
    }
}

/// Host de imágenes falso
struct FakeAssetHost {
    secure_url: Option<String>,
    uploads: Mutex<Vec<String>>,
}

impl FakeAssetHost {
    fn serving(secure_url: &str) -> Self {
        Self {
            secure_url: Some(secure_url.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            secure_url: None,
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssetHost for FakeAssetHost {
    async fn upload(&self, file: AvatarFile) -> AppResult<AssetUploadResponse> {
        self.uploads.lock().unwrap().push(file.file_name);
        match &self.secure_url {
            Some(secure_url) => Ok(AssetUploadResponse {
                secure_url: secure_url.clone(),
                public_id: None,
            }),
            None => Err(AppError::ExternalApi("fallo simulado".to_string())),
        }
    }
}

/// Navegador que captura, en el momento de navegar, lo que el destino
/// observaría en la sesión.
#[derive(Clone)]
struct RecordingNavigator {
    session: SessionStore,
    observed: Arc<Mutex<Vec<Option<String>>>>,
}

impl RecordingNavigator {
    fn new(session: SessionStore) -> Self {
        Self {
            session,
            observed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn navigations(&self) -> Vec<Option<String>> {
        self.observed.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn to_sign_in(&self) {
        self.observed.lock().unwrap().push(self.session.try_get());
    }
}

#[derive(Clone, Default)]
struct RecordingNotices {
    messages: Arc<Mutex<Vec<String>>>,
}

impl NoticeHost for RecordingNotices {
    fn show_notice(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct Harness {
    api: Arc<FakeProfileApi>,
    assets: Arc<FakeAssetHost>,
    session: SessionStore,
    navigator: RecordingNavigator,
    notices: RecordingNotices,
    controller: ProfileController,
}

fn harness(api: FakeProfileApi, assets: FakeAssetHost, session: SessionStore) -> Harness {
    let api = Arc::new(api);
    let assets = Arc::new(assets);
    let navigator = RecordingNavigator::new(session.clone());
    let notices = RecordingNotices::default();
    let controller = ProfileController::new(
        api.clone(),
        assets.clone(),
        session.clone(),
        Arc::new(navigator.clone()),
        Arc::new(notices.clone()),
        Duration::from_millis(10),
    );
    Harness {
        api,
        assets,
        session,
        navigator,
        notices,
        controller,
    }
}

fn avatar_file() -> AvatarFile {
    AvatarFile {
        file_name: "nueva.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
        content_type: "image/png".to_string(),
    }
}

#[tokio::test]
async fn without_session_navigates_before_any_network_call() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::new(),
    );

    assert_eq!(h.controller.activate().await, ProfileEditState::Loading);

    assert_eq!(h.navigator.navigations().len(), 1);
    assert!(h.api.fetches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn activate_loads_canonical_and_seeds_editable() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );

    assert_eq!(h.controller.activate().await, ProfileEditState::Viewing);

    assert_eq!(h.api.fetches.lock().unwrap().clone(), vec!["ana@example.com"]);
    assert_eq!(h.controller.canonical().await, Some(canonical_profile()));
    let editable = h.controller.editable().await.unwrap();
    assert_eq!(editable.name, "Ana");
    assert!(editable.new_password.is_none());
}

#[tokio::test]
async fn fetch_failure_stays_loading_forever() {
    let h = harness(
        FakeProfileApi::failing(),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );

    assert_eq!(h.controller.activate().await, ProfileEditState::Loading);

    // Sin navegación, sin reintento, solo el registro de diagnóstico
    assert!(h.navigator.navigations().is_empty());
    assert_eq!(h.api.fetches.lock().unwrap().len(), 1);
    let failure = h.controller.last_failure().await.expect("debe registrarse");
    assert_eq!(failure.operation, "fetch_profile");
}

#[tokio::test]
async fn cancel_edit_restores_the_last_loaded_canonical_values() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;

    assert_eq!(h.controller.begin_edit().await, ProfileEditState::Editing);
    h.controller.update_field(ProfileField::Name, "Otro").await;
    h.controller
        .update_field(ProfileField::Email, "otro@example.com")
        .await;
    h.controller
        .update_field(ProfileField::NewPassword, "nueva")
        .await;

    assert_eq!(h.controller.cancel_edit().await, ProfileEditState::Viewing);

    let editable = h.controller.editable().await.unwrap();
    assert_eq!(editable.name, "Ana");
    assert_eq!(editable.email, "ana@example.com");
    assert!(editable.new_password.is_none());
    assert_eq!(h.controller.canonical().await, Some(canonical_profile()));
    assert!(h.api.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn save_keys_by_current_canonical_email_and_repersists_session() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;
    h.controller.begin_edit().await;
    h.controller
        .update_field(ProfileField::Email, "nueva@example.com")
        .await;

    assert_eq!(h.controller.save().await, ProfileEditState::Viewing);

    let updates = h.api.updates.lock().unwrap().clone();
    assert_eq!(updates.len(), 1);
    // La clave del PUT es el email canónico previo al save
    assert_eq!(updates[0].0, "ana@example.com");
    assert_eq!(updates[0].1.email, "nueva@example.com");

    // El canónico adopta la respuesta y la sesión se re-persiste
    assert_eq!(
        h.controller.canonical().await.unwrap().email,
        "nueva@example.com"
    );
    assert_eq!(h.session.get().await, Some("nueva@example.com".to_string()));
}

#[tokio::test]
async fn save_failure_reverts_to_editing_without_touching_canonical() {
    let h = harness(
        FakeProfileApi::with_failing_updates(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;
    h.controller.begin_edit().await;
    h.controller.update_field(ProfileField::Name, "Otro").await;

    assert_eq!(h.controller.save().await, ProfileEditState::Editing);

    assert_eq!(h.controller.canonical().await, Some(canonical_profile()));
    assert_eq!(h.session.get().await, Some("ana@example.com".to_string()));
    // La copia editable conserva las ediciones en curso
    assert_eq!(h.controller.editable().await.unwrap().name, "Otro");
    let failure = h.controller.last_failure().await.expect("debe registrarse");
    assert_eq!(failure.operation, "update_profile");
}

#[tokio::test]
async fn save_outside_editing_is_a_no_op() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;

    assert_eq!(h.controller.save().await, ProfileEditState::Viewing);
    assert!(h.api.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn successful_upload_updates_only_the_editable_avatar() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::serving("https://res.example.com/nueva.png"),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;
    h.controller.begin_edit().await;

    h.controller.upload_avatar(avatar_file()).await;

    assert_eq!(h.assets.uploads.lock().unwrap().clone(), vec!["nueva.png"]);
    assert_eq!(
        h.controller.editable().await.unwrap().avatar,
        "https://res.example.com/nueva.png"
    );
    // Visible pero no persistido: el canónico no cambia y no se llama
    // a ningún endpoint de actualización de perfil
    assert_eq!(
        h.controller.canonical().await.unwrap().avatar,
        "https://res.example.com/ana.jpg"
    );
    assert!(h.api.updates.lock().unwrap().is_empty());
    assert!(h.api.avatar_updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_upload_leaves_avatar_untouched() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;
    h.controller.begin_edit().await;

    h.controller.upload_avatar(avatar_file()).await;

    assert_eq!(
        h.controller.editable().await.unwrap().avatar,
        "https://res.example.com/ana.jpg"
    );
    let failure = h.controller.last_failure().await.expect("debe registrarse");
    assert_eq!(failure.operation, "upload_avatar");
}

#[tokio::test]
async fn password_is_sent_only_when_the_user_typed_a_new_one() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;

    // Save sin tocar la contraseña: el cuerpo no lleva el campo
    h.controller.begin_edit().await;
    h.controller.update_field(ProfileField::Name, "Ana B").await;
    h.controller.save().await;

    // Save con contraseña nueva: el cuerpo la lleva
    h.controller.begin_edit().await;
    h.controller
        .update_field(ProfileField::NewPassword, "nueva")
        .await;
    h.controller.save().await;

    let updates = h.api.updates.lock().unwrap().clone();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].1.password, None);
    let body = serde_json::to_value(&updates[0].1).unwrap();
    assert!(body.get("password").is_none());
    assert_eq!(updates[1].1.password, Some("nueva".to_string()));
}

#[tokio::test]
async fn commit_avatar_persists_through_the_dedicated_endpoint() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::serving("https://res.example.com/nueva.png"),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;
    h.controller.begin_edit().await;
    h.controller.upload_avatar(avatar_file()).await;

    h.controller.commit_avatar().await;

    let avatar_updates = h.api.avatar_updates.lock().unwrap().clone();
    assert_eq!(
        avatar_updates,
        vec![(
            "ana@example.com".to_string(),
            "https://res.example.com/nueva.png".to_string()
        )]
    );
    assert!(h.api.updates.lock().unwrap().is_empty());
    assert_eq!(
        h.controller.canonical().await.unwrap().avatar,
        "https://res.example.com/nueva.png"
    );
}

#[tokio::test]
async fn logout_clears_the_session_before_navigating() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );
    h.controller.activate().await;

    h.controller.logout().await;

    assert_eq!(
        h.notices.messages.lock().unwrap().clone(),
        vec!["You are being logged out.".to_string()]
    );
    // El destino de la navegación observa la sesión ya limpia
    assert_eq!(h.navigator.navigations(), vec![None]);
    assert_eq!(h.session.get().await, None);
}

#[tokio::test]
async fn completion_after_teardown_mutates_nothing() {
    let h = harness(
        FakeProfileApi::serving(canonical_profile()),
        FakeAssetHost::failing(),
        SessionStore::with_identifier("ana@example.com"),
    );

    h.controller.teardown().await;
    assert_eq!(h.controller.activate().await, ProfileEditState::Loading);

    // El request salió, pero la finalización se descartó
    assert_eq!(h.api.fetches.lock().unwrap().len(), 1);
    assert_eq!(h.controller.canonical().await, None);
    assert_eq!(h.controller.editable().await, None);
}
