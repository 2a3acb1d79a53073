use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Posts: index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_user")
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Comments: index on post_id and user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_user")
                    .table(Comments::Table)
                    .col(Comments::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // PostTag: reverse lookup by tag (post_id is covered by the primary key)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_tag_tag")
                    .table(PostTag::Table)
                    .col(PostTag::TagId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_tag_tag").table(PostTag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comments_user").table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comments_post").table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_posts_user").table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts { Table, UserId }

#[derive(DeriveIden)]
enum Comments { Table, PostId, UserId }

#[derive(DeriveIden)]
enum PostTag { Table, TagId }
