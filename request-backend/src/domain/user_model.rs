// src/domain/user_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 最初に作成されるオーナーアカウントのID
///
/// このアカウントは削除できず、本人以外は変更できない。
pub const OWNER_USER_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    pub username: Option<String>,

    pub avatar: Option<String>,

    pub permissions: i32,

    #[serde(skip_serializing)] // 資格情報トークンは絶対にシリアライズしない
    pub plex_token: String,

    #[sea_orm(unique, nullable)]
    pub plex_id: Option<i64>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "crate::domain::media_request_model::Entity",
        from = "Column::Id",
        to = "crate::domain::media_request_model::Column::UserId"
    )]
    MediaRequests,
}

impl Related<crate::domain::media_request_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaRequests.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

// ユーザー用の便利メソッド実装
impl Model {
    /// オーナーアカウントかチェック
    pub fn is_owner(&self) -> bool {
        self.id == OWNER_USER_ID
    }

    /// 資格情報トークンを除いた外部送信用のユーザー表現を取得
    pub fn to_filtered(&self) -> FilteredUser {
        FilteredUser {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            avatar: self.avatar.clone(),
            permissions: self.permissions,
            plex_id: self.plex_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 資格情報トークンを含まないユーザー表現
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilteredUser {
    pub id: i32,
    pub email: String,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub permissions: i32,
    pub plex_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
