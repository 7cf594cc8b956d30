// tests/common/app_helper.rs

use async_trait::async_trait;
use axum::Router;
use request_backend::{
    api::{create_app, AppState},
    config::AppConfig,
    domain::media_request_model::{self, ActiveModel as MediaRequestActiveModel},
    domain::user_model::{self, ActiveModel as UserActiveModel},
    error::AppResult,
    service::plex_service::{PlexLinkedAccount, PlexUsersApi},
};
use sea_orm::Set;
use std::sync::Arc;

use crate::common;

/// 固定のアカウント一覧を返すPlex APIモック
pub struct MockPlexApi {
    accounts: Vec<PlexLinkedAccount>,
}

impl MockPlexApi {
    pub fn new(accounts: Vec<PlexLinkedAccount>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl PlexUsersApi for MockPlexApi {
    async fn get_users(&self, _plex_token: &str) -> AppResult<Vec<PlexLinkedAccount>> {
        Ok(self.accounts.clone())
    }
}

/// テスト用アプリのセットアップ（Plexアカウントなし）
pub async fn setup_app() -> (Router, AppState, common::db::TestDatabase) {
    setup_app_with_plex(Vec::new()).await
}

/// 指定したPlexアカウント一覧を返すモック付きでアプリをセットアップ
pub async fn setup_app_with_plex(
    accounts: Vec<PlexLinkedAccount>,
) -> (Router, AppState, common::db::TestDatabase) {
    let db = common::db::TestDatabase::new().await;
    let config = Arc::new(AppConfig::for_testing());
    let state = AppState::new(
        db.connection.clone(),
        config,
        Arc::new(MockPlexApi::new(accounts)),
    );
    let app = create_app(state.clone());
    (app, state, db)
}

/// ユーザーをDBへ直接作成
///
/// 新しいデータベースでは最初に作成したユーザーがid=1（オーナー）になる。
pub async fn seed_user(
    state: &AppState,
    email: &str,
    permissions: i32,
    plex_id: Option<i64>,
    plex_token: &str,
) -> user_model::Model {
    state
        .user_repository
        .create(UserActiveModel {
            email: Set(email.to_string()),
            permissions: Set(permissions),
            plex_token: Set(plex_token.to_string()),
            plex_id: Set(plex_id),
            ..Default::default()
        })
        .await
        .unwrap()
}

/// メディアリクエストをDBへ直接作成
pub async fn seed_request(
    state: &AppState,
    user_id: i32,
    media_id: i32,
) -> media_request_model::Model {
    state
        .media_request_repository
        .create(MediaRequestActiveModel {
            media_id: Set(media_id),
            status: Set(media_request_model::STATUS_PENDING),
            user_id: Set(user_id),
            ..Default::default()
        })
        .await
        .unwrap()
}

/// 指定ユーザーのアクセストークンを発行
pub fn bearer_for(state: &AppState, user_id: i32) -> String {
    state.jwt_manager.generate_access_token(user_id).unwrap()
}
