// src/middleware/auth.rs

use crate::api::AppState;
use crate::domain::user_policy::Actor;
use crate::error::AppError;
use crate::logging::RequestContext;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// 認証済みユーザー情報を格納するエクステンション
///
/// 権限はトークンではなく毎リクエストDBから読み直した最新値。
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub permissions: i32,
}

impl AuthenticatedUser {
    /// ポリシー評価用のActorに変換
    pub fn as_actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            permissions: self.permissions,
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Bearerヘッダーまたはクッキーからアクセストークンを取り出す
fn extract_token(req: &Request, jar: &CookieJar) -> Option<String> {
    if let Some(header_value) = req.headers().get(header::AUTHORIZATION) {
        if let Ok(value) = header_value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// JWT認証ミドルウェア
///
/// トークンを検証し、ユーザーをDBから読み直してリクエストに添付する。
pub async fn jwt_auth_middleware(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&req, &jar)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let claims = app_state.jwt_manager.verify_access_token(&token)?;

    let user = app_state
        .user_repository
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    if let Some(context) = req.extensions_mut().get_mut::<RequestContext>() {
        context.user_id = Some(user.id);
    }

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        permissions: user.permissions,
    });

    Ok(next.run(req).await)
}
