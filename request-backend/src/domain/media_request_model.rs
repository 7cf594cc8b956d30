// src/domain/media_request_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 新規リクエストの初期状態（承認待ち）
pub const STATUS_PENDING: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub media_id: i32,

    pub status: i32,

    pub user_id: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::UserId",
        to = "crate::domain::user_model::Column::Id"
    )]
    User,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
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

    // メディア側の派生状態（未リクエスト状態への復帰）はこのフックに
    // ぶら下がる。DBレベルのカスケード削除ではフックが走らないため、
    // リクエストの削除は必ずこの経路を通すこと。
    async fn after_delete<C>(self, _db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let sea_orm::ActiveValue::Unchanged(media_id) | sea_orm::ActiveValue::Set(media_id) =
            &self.media_id
        {
            tracing::debug!(media_id = *media_id, "Media request removed");
        }
        Ok(self)
    }
}
