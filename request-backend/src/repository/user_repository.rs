// src/repository/user_repository.rs

use crate::domain::media_request_model;
use crate::domain::user_model::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use sea_orm::entity::*;
use sea_orm::{DbConn, DbErr, Order, QueryFilter, QueryOrder};

#[derive(Debug)]
pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    // --- 基本CRUD操作 ---

    /// ユーザーをIDで検索
    pub async fn find_by_id(&self, id: i32) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(&self.db).await
    }

    /// 全ユーザーを取得
    pub async fn find_all(&self) -> Result<Vec<user_model::Model>, DbErr> {
        UserEntity::find()
            .order_by(user_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await
    }

    /// ユーザーと関連リクエストをまとめて取得
    pub async fn find_by_id_with_requests(
        &self,
        id: i32,
    ) -> Result<Option<(user_model::Model, Vec<media_request_model::Model>)>, DbErr> {
        let mut results = UserEntity::find_by_id(id)
            .find_with_related(media_request_model::Entity)
            .all(&self.db)
            .await?;

        if results.is_empty() {
            return Ok(None);
        }
        Ok(Some(results.remove(0)))
    }

    /// 最初に作成されたユーザー（オーナーアカウント）を取得
    pub async fn find_owner(&self) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .order_by(user_model::Column::Id, Order::Asc)
            .one(&self.db)
            .await
    }

    /// 外部プロバイダーIDでユーザーを検索
    pub async fn find_by_plex_id(
        &self,
        plex_id: i64,
    ) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::PlexId.eq(plex_id))
            .one(&self.db)
            .await
    }

    /// ユーザーを作成
    pub async fn create(&self, user: UserActiveModel) -> Result<user_model::Model, DbErr> {
        user.insert(&self.db).await
    }

    /// ユーザーを更新
    pub async fn update(&self, user: UserActiveModel) -> Result<user_model::Model, DbErr> {
        user.update(&self.db).await
    }

    /// ユーザーを削除
    pub async fn delete(&self, user: user_model::Model) -> Result<(), DbErr> {
        user.delete(&self.db).await?;
        Ok(())
    }
}
