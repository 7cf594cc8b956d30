// src/repository/media_request_repository.rs

use crate::domain::media_request_model::{
    self, ActiveModel as MediaRequestActiveModel, Entity as MediaRequestEntity,
};
use sea_orm::entity::*;
use sea_orm::{DbConn, DbErr, QueryFilter};

#[derive(Debug)]
pub struct MediaRequestRepository {
    db: DbConn,
}

impl MediaRequestRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// ユーザーのリクエストを取得
    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<media_request_model::Model>, DbErr> {
        MediaRequestEntity::find()
            .filter(media_request_model::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
    }

    /// リクエストを作成
    pub async fn create(
        &self,
        request: MediaRequestActiveModel,
    ) -> Result<media_request_model::Model, DbErr> {
        request.insert(&self.db).await
    }

    /// リクエストを1件削除
    ///
    /// delete_manyではなく必ずこの経路を使うこと。エンティティの削除フックが
    /// メディア側の派生状態を巻き戻すため、一括削除ではそれがスキップされる。
    pub async fn delete(&self, request: media_request_model::Model) -> Result<(), DbErr> {
        request.delete(&self.db).await?;
        Ok(())
    }
}
