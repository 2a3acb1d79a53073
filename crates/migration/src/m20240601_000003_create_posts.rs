//! Create `posts` table with FK to `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(pk_auto(Posts::Id))
                    .col(integer(Posts::UserId).not_null())
                    .col(string_len(Posts::Title, 255).not_null())
                    .col(text(Posts::Content).not_null())
                    .col(timestamp_with_time_zone(Posts::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Posts::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_user")
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Posts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Posts { Table, Id, UserId, Title, Content, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }
