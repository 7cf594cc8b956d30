// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use migration::{Migrator, MigratorTrait};
use request_backend::api::{create_app, AppState};
use request_backend::config::Config;
use request_backend::db::create_db_pool;
use request_backend::service::plex_service::PlexTvClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .envの読み込み（存在しなければ無視）
    dotenvy::dotenv().ok();

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting request backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().expect("Failed to load configuration");
    if app_config.is_development() {
        tracing::info!("Running in development mode");
    }

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    // マイグレーションを適用
    Migrator::up(&db_pool, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations applied.");

    // Plexクライアントとアプリケーション状態の作成
    let plex_client =
        Arc::new(PlexTvClient::new(app_config.plex_api_url.clone()).expect("Failed to build Plex client"));
    let server_addr = format!("{}:{}", app_config.host, app_config.port);
    let app_state = AppState::new(db_pool, Arc::new(app_config), plex_client);

    // ルーターの設定とサーバーの起動
    let app_router = create_app(app_state);
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
