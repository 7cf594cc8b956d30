// src/utils/jwt.rs

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// アクセストークンのクレーム
///
/// トークンはセッション発行側（スコープ外）と共有するフォーマット。
/// 権限は発行時のスナップショットになるため持たせず、リクエストごとに
/// DBから最新の値を読む。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: Duration,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            access_token_expiry: Duration::days(30),
        }
    }

    /// アクセストークンを発行
    pub fn generate_access_token(&self, user_id: i32) -> AppResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            user_id,
            iat: now.timestamp(),
            exp: (now + self.access_token_expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
    }

    /// アクセストークンを検証してクレームを取得
    pub fn verify_access_token(&self, token: &str) -> AppResult<AccessTokenClaims> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}
