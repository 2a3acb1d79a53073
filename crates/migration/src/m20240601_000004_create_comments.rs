//! Create `comments` table.
//!
//! A comment belongs to both a post and its author; removing either removes the comment.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(pk_auto(Comments::Id))
                    .col(integer(Comments::PostId).not_null())
                    .col(integer(Comments::UserId).not_null())
                    .col(text(Comments::Content).not_null())
                    .col(timestamp_with_time_zone(Comments::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Comments::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_post")
                            .from(Comments::Table, Comments::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user")
                            .from(Comments::Table, Comments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Comments { Table, Id, PostId, UserId, Content, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Posts { Table, Id }

#[derive(DeriveIden)]
enum Users { Table, Id }
