// src/service/user_service.rs

use crate::domain::permission::PermissionChecker;
use crate::domain::user_model::{self, ActiveModel as UserActiveModel};
use crate::domain::user_policy::{evaluate_update, Actor, UpdateAttempt};
use crate::error::{AppError, AppResult};
use crate::repository::media_request_repository::MediaRequestRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::plex_service::{PlexLinkedAccount, PlexUsersApi};
use sea_orm::{IntoActiveModel, Set};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// 更新可能なフィールドの明示的な許可リスト
///
/// ボディに含まれるその他のプロパティは無視される。
#[derive(Clone, Debug, Default, Validate)]
pub struct UserUpdateFields {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub permissions: Option<i32>,
}

/// インポート時の1アカウントに対する処理内容
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportAction {
    /// 既存ユーザーのプロフィールを更新（権限とトークンは維持）
    RefreshExisting,
    /// 新規ローカルユーザーを作成
    CreateNew { email: String, username: String },
    /// emailまたはusernameを欠く不完全なアカウントは取り込まない
    Skip,
}

/// 外部アカウント1件に対する取り込み判断
pub fn plan_import_action(has_local_match: bool, account: &PlexLinkedAccount) -> ImportAction {
    if has_local_match {
        return ImportAction::RefreshExisting;
    }
    match (&account.email, &account.username) {
        (Some(email), Some(username)) => ImportAction::CreateNew {
            email: email.clone(),
            username: username.clone(),
        },
        _ => ImportAction::Skip,
    }
}

pub struct UserService {
    user_repository: Arc<UserRepository>,
    media_request_repository: Arc<MediaRequestRepository>,
    plex_api: Arc<dyn PlexUsersApi>,
    default_permissions: i32,
}

impl UserService {
    pub fn new(
        user_repository: Arc<UserRepository>,
        media_request_repository: Arc<MediaRequestRepository>,
        plex_api: Arc<dyn PlexUsersApi>,
        default_permissions: i32,
    ) -> Self {
        Self {
            user_repository,
            media_request_repository,
            plex_api,
            default_permissions,
        }
    }

    /// 全ユーザーを取得
    pub async fn list_users(&self) -> AppResult<Vec<user_model::Model>> {
        Ok(self.user_repository.find_all().await?)
    }

    /// ローカル認証のユーザーを作成
    ///
    /// 資格情報トークンは常に空で保存される。
    pub async fn create_user(&self, email: &str, permissions: i32) -> AppResult<user_model::Model> {
        let user = UserActiveModel {
            email: Set(email.to_string()),
            permissions: Set(permissions),
            plex_token: Set(String::new()),
            ..Default::default()
        };

        let created = self.user_repository.create(user).await?;
        info!(user_id = created.id, "User created");
        Ok(created)
    }

    /// ユーザーをIDで取得
    pub async fn get_user(&self, id: i32) -> AppResult<user_model::Model> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// ユーザーを更新
    ///
    /// ポリシーチェーンを最初に評価する。拒否はボディの内容検証より
    /// 優先されるため、不正なフィールド値を含むリクエストでも403が
    /// 返る。通過した場合のみ許可リストのフィールドを検証・適用する。
    pub async fn update_user(
        &self,
        actor: Actor,
        target_id: i32,
        fields: UserUpdateFields,
    ) -> AppResult<user_model::Model> {
        let attempt = UpdateAttempt {
            target_id,
            requested_permissions: fields.permissions,
        };

        if let Err(denial) = evaluate_update(&actor, &attempt) {
            warn!(
                actor_id = actor.user_id,
                target_id = target_id,
                policy = denial.policy,
                "User update denied"
            );
            return Err(AppError::Forbidden(denial.reason));
        }

        fields.validate()?;

        let user = self
            .user_repository
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut active = user.into_active_model();
        if let Some(email) = fields.email {
            active.email = Set(email);
        }
        if let Some(username) = fields.username {
            active.username = Set(Some(username));
        }
        if let Some(avatar) = fields.avatar {
            active.avatar = Set(Some(avatar));
        }
        if let Some(permissions) = fields.permissions {
            active.permissions = Set(permissions);
        }

        let updated = self.user_repository.update(active).await?;
        info!(user_id = updated.id, "User updated");
        Ok(updated)
    }

    /// ユーザーを削除
    ///
    /// 関連リクエストを1件ずつ削除してからユーザー本体を削除する。
    /// 削除済みレコードのスナップショットを返す。
    pub async fn delete_user(&self, target_id: i32) -> AppResult<user_model::Model> {
        let (user, requests) = self
            .user_repository
            .find_by_id_with_requests(target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.is_owner() {
            return Err(AppError::MethodNotAllowed(
                "This account cannot be deleted.".to_string(),
            ));
        }

        if PermissionChecker::is_admin(user.permissions) {
            return Err(AppError::MethodNotAllowed(
                "You cannot delete users with administrative privileges.".to_string(),
            ));
        }

        let request_count = requests.len();
        for request in requests {
            self.media_request_repository.delete(request).await?;
        }

        self.user_repository.delete(user.clone()).await?;
        info!(
            user_id = user.id,
            deleted_requests = request_count,
            "User deleted"
        );
        Ok(user)
    }

    /// オーナーの資格情報でPlexの連携アカウントを取り込む
    ///
    /// 新規作成されたユーザーのみを返す。既存ユーザーはプロフィールを
    /// 更新するが結果には含めない。
    pub async fn import_plex_users(&self) -> AppResult<Vec<user_model::Model>> {
        let owner = self
            .user_repository
            .find_owner()
            .await?
            .ok_or_else(|| AppError::InternalServerError("Owner account is missing".to_string()))?;

        let accounts = self.plex_api.get_users(&owner.plex_token).await?;
        let mut created_users = Vec::new();

        for account in accounts {
            let existing = self.user_repository.find_by_plex_id(account.id).await?;

            match plan_import_action(existing.is_some(), &account) {
                ImportAction::RefreshExisting => {
                    if let Some(user) = existing {
                        let user_id = user.id;
                        let mut active = user.into_active_model();
                        active.avatar = Set(account.thumb.clone());
                        if let Some(email) = account.email.clone() {
                            active.email = Set(email);
                        }
                        if let Some(username) = account.username.clone() {
                            active.username = Set(Some(username));
                        }
                        self.user_repository.update(active).await?;
                        debug!(user_id = user_id, plex_id = account.id, "Plex user refreshed");
                    }
                }
                ImportAction::CreateNew { email, username } => {
                    let user = UserActiveModel {
                        email: Set(email),
                        username: Set(Some(username)),
                        avatar: Set(account.thumb.clone()),
                        permissions: Set(self.default_permissions),
                        plex_token: Set(String::new()),
                        plex_id: Set(Some(account.id)),
                        ..Default::default()
                    };
                    let created = self.user_repository.create(user).await?;
                    debug!(
                        user_id = created.id,
                        plex_id = account.id,
                        "Plex user imported"
                    );
                    created_users.push(created);
                }
                ImportAction::Skip => {
                    debug!(plex_id = account.id, "Skipping incomplete Plex account");
                }
            }
        }

        info!(created = created_users.len(), "Plex user import finished");
        Ok(created_users)
    }
}
