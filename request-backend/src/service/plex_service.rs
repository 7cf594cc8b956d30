// src/service/plex_service.rs

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Plexアカウントプロバイダーが返す連携アカウント
///
/// emailやusernameが欠けている不完全なアカウント（招待のみの
/// プレースホルダーなど）がそのまま返ってくることがある。
#[derive(Clone, Debug, Deserialize)]
pub struct PlexLinkedAccount {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub thumb: Option<String>,
}

/// 「連携アカウント一覧」APIの抽象
///
/// テストではモック実装を注入する。
#[async_trait]
pub trait PlexUsersApi: Send + Sync {
    async fn get_users(&self, plex_token: &str) -> AppResult<Vec<PlexLinkedAccount>>;
}

/// plex.tvへの実クライアント
pub struct PlexTvClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlexTvClient {
    pub fn new(base_url: String) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::InternalServerError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl PlexUsersApi for PlexTvClient {
    async fn get_users(&self, plex_token: &str) -> AppResult<Vec<PlexLinkedAccount>> {
        let url = format!("{}/api/v2/friends", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("X-Plex-Token", plex_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to reach Plex: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Plex returned status {}",
                response.status()
            )));
        }

        response.json::<Vec<PlexLinkedAccount>>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse Plex response: {}", e))
        })
    }
}
