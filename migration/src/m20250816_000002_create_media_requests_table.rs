use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MediaRequests::MediaId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaRequests::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(MediaRequests::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(MediaRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MediaRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        // No ON DELETE CASCADE: requests are removed through
                        // the entity delete path so media-state hooks run.
                        ForeignKey::create()
                            .name("fk_media_requests_user_id")
                            .from(MediaRequests::Table, MediaRequests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(MediaRequests::Table)
                    .name("idx_media_requests_user_id")
                    .col(MediaRequests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MediaRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MediaRequests {
    Table,
    Id,
    MediaId,
    Status,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
