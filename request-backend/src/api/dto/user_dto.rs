// src/api/dto/user_dto.rs

use crate::service::user_service::UserUpdateFields;
use serde::Deserialize;
use validator::Validate;

// --- リクエストDTO ---

/// ユーザー作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub permissions: i32,
}

/// ユーザー更新リクエスト
///
/// 更新可能なフィールドの明示的な許可リスト。ここに無いプロパティが
/// ボディに含まれていても無視される。フィールド値の検証は
/// `UserUpdateFields`側で、ポリシー評価を通過した後に行われる。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,

    pub username: Option<String>,

    pub avatar: Option<String>,

    pub permissions: Option<i32>,
}

impl UpdateUserRequest {
    pub fn into_fields(self) -> UserUpdateFields {
        UserUpdateFields {
            email: self.email,
            username: self.username,
            avatar: self.avatar,
            permissions: self.permissions,
        }
    }
}
