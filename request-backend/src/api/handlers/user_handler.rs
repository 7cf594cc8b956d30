// src/api/handlers/user_handler.rs

use crate::api::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::api::AppState;
use crate::domain::user_model::FilteredUser;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{jwt_auth_middleware, AuthenticatedUser};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use tracing::{error, info};
use validator::Validate;

/// ユーザー一覧取得
///
/// 全ユーザーをフィルター済み表現で返す。ページネーションなし。
pub async fn list_users_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<FilteredUser>>> {
    let users = app_state.user_service.list_users().await?;
    Ok(Json(users.iter().map(|u| u.to_filtered()).collect()))
}

/// ユーザー作成
pub async fn create_user_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<FilteredUser>)> {
    payload.validate()?;

    let user = app_state
        .user_service
        .create_user(&payload.email, payload.permissions)
        .await
        // 永続化エラーはメッセージをそのまま呼び出し元に返す
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!(user_id = user.id, "User created via API");
    Ok((StatusCode::CREATED, Json(user.to_filtered())))
}

/// ユーザー単体取得
pub async fn get_user_handler(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FilteredUser>> {
    let user = app_state
        .user_service
        .get_user(id)
        .await
        // 未検出以外のエラーもクライアントには404として見せる
        .map_err(|_| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.to_filtered()))
}

/// ユーザー更新
///
/// ボディの検証はサービス側でポリシー評価の後に行われる。検証を先に
/// 走らせると、保護対象への更新が403ではなく400で返ってしまう。
pub async fn update_user_handler(
    State(app_state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<FilteredUser>> {
    let user = app_state
        .user_service
        .update_user(caller.as_actor(), id, payload.into_fields())
        .await
        .map_err(|e| match e {
            AppError::Forbidden(_) | AppError::ValidationFailure(_) => e,
            // 未検出とDB障害はクライアントには区別されない
            _ => AppError::NotFound("User not found".to_string()),
        })?;

    Ok(Json(user.to_filtered()))
}

/// ユーザー削除
pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FilteredUser>> {
    let user = app_state
        .user_service
        .delete_user(id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) | AppError::MethodNotAllowed(_) => e,
            other => {
                // 詳細はサーバーログのみに残し、呼び出し元には出さない
                error!(user_id = id, error = %other, "Something went wrong deleting a user");
                AppError::InternalServerError("Something went wrong.".to_string())
            }
        })?;

    Ok(Json(user.to_filtered()))
}

/// Plex連携アカウントの一括インポート
pub async fn import_from_plex_handler(
    State(app_state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<FilteredUser>>)> {
    let created = app_state
        .user_service
        .import_plex_users()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!(created = created.len(), "Plex users imported via API");
    Ok((
        StatusCode::CREATED,
        Json(created.iter().map(|u| u.to_filtered()).collect()),
    ))
}

/// ユーザー管理ルーター
pub fn user_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(list_users_handler).post(create_user_handler))
        .route("/import-from-plex", post(import_from_plex_handler))
        .route(
            "/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            jwt_auth_middleware,
        ))
        .with_state(app_state)
}
