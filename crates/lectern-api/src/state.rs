//! Application state shared across all handlers.

use std::sync::Arc;

use lectern_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use lectern_core::config::AppConfig;
use lectern_database::DatabasePool;
use lectern_realtime::ConversionNotifier;
use lectern_storage::object_store::ObjectStore;

use lectern_database::repositories::academy::AcademyRepository;
use lectern_database::repositories::audio::AudioRepository;
use lectern_database::repositories::favorite::FavoriteRepository;
use lectern_database::repositories::material::MaterialRepository;
use lectern_database::repositories::page::PageRepository;
use lectern_database::repositories::user::UserRepository;

use lectern_service::{
    AcademyService, AudioService, AuthService, FavoriteService, HtmlLayerService, MaterialService,
    PdfIngestService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool wrapper.
    pub db: DatabasePool,

    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Material service.
    pub material_service: Arc<MaterialService>,
    /// Favorite service.
    pub favorite_service: Arc<FavoriteService>,
    /// PDF ingest service.
    pub pdf_service: Arc<PdfIngestService>,
    /// Audio service.
    pub audio_service: Arc<AudioService>,
    /// HTML overlay service.
    pub html_layer_service: Arc<HtmlLayerService>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Academy service.
    pub academy_service: Arc<AcademyService>,
    /// Auth service.
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires repositories and services from the shared infrastructure.
    pub fn build(config: AppConfig, db: DatabasePool, store: ObjectStore) -> Self {
        let pool = db.pool().clone();
        let store = Arc::new(store);
        let notifier = Arc::new(ConversionNotifier::new());

        let material_repo = Arc::new(MaterialRepository::new(pool.clone()));
        let favorite_repo = Arc::new(FavoriteRepository::new(pool.clone()));
        let page_repo = Arc::new(PageRepository::new(pool.clone()));
        let audio_repo = Arc::new(AudioRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let academy_repo = Arc::new(AcademyRepository::new(pool.clone()));

        let jwt_encoder = JwtEncoder::new(&config.auth);
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let hasher = PasswordHasher::new();

        let material_service = Arc::new(MaterialService::new(
            pool.clone(),
            Arc::clone(&material_repo),
            Arc::clone(&page_repo),
            Arc::clone(&store),
        ));
        let favorite_service = Arc::new(FavoriteService::new(
            Arc::clone(&favorite_repo),
            Arc::clone(&material_repo),
        ));
        let pdf_service = Arc::new(PdfIngestService::new(
            pool.clone(),
            Arc::clone(&material_repo),
            Arc::clone(&page_repo),
            Arc::clone(&store),
            Arc::clone(&notifier),
            config.storage.max_pdf_size_bytes,
            &config.server.public_url,
        ));
        let audio_service = Arc::new(AudioService::new(
            pool,
            Arc::clone(&page_repo),
            Arc::clone(&audio_repo),
            Arc::clone(&store),
            config.storage.max_audio_size_bytes,
        ));
        let html_layer_service = Arc::new(HtmlLayerService::new(
            Arc::clone(&page_repo),
            Arc::clone(&store),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&academy_repo),
            hasher.clone(),
            config.auth.password_min_length,
        ));
        let academy_service = Arc::new(AcademyService::new(Arc::clone(&academy_repo)));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&academy_repo),
            hasher,
            jwt_encoder,
        ));

        Self {
            config: Arc::new(config),
            db,
            jwt_decoder,
            material_service,
            favorite_service,
            pdf_service,
            audio_service,
            html_layer_service,
            user_service,
            academy_service,
            auth_service,
        }
    }
}
