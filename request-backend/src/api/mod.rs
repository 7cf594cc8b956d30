// src/api/mod.rs

use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::repository::media_request_repository::MediaRequestRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::plex_service::PlexUsersApi;
use crate::service::user_service::UserService;
use crate::utils::jwt::JwtManager;
use axum::{http::HeaderValue, middleware, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub user_repository: Arc<UserRepository>,
    pub media_request_repository: Arc<MediaRequestRepository>,
    pub jwt_manager: Arc<JwtManager>,
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        config: Arc<AppConfig>,
        plex_api: Arc<dyn PlexUsersApi>,
    ) -> Self {
        let user_repository = Arc::new(UserRepository::new(db.clone()));
        let media_request_repository = Arc::new(MediaRequestRepository::new(db.clone()));
        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            media_request_repository.clone(),
            plex_api,
            config.default_permissions,
        ));
        let jwt_manager = Arc::new(JwtManager::new(&config.jwt_secret));

        Self {
            user_service,
            user_repository,
            media_request_repository,
            jwt_manager,
            db,
            config,
        }
    }
}

/// アプリケーション全体のルーターを構築
pub fn create_app(app_state: AppState) -> Router {
    let origins: Vec<HeaderValue> = app_state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(
            "/api/v1/users",
            handlers::user_handler::user_router(app_state),
        )
        // レイヤーは下から上に向かって外側になる
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
