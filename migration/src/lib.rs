// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// マイグレーションモジュール
mod m20250816_000001_create_users_table;
mod m20250816_000002_create_media_requests_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250816_000001_create_users_table::Migration),
            // 2. usersに依存するテーブル
            Box::new(m20250816_000002_create_media_requests_table::Migration),
        ]
    }
}
