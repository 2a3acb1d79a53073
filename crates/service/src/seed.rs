//! One-shot bootstrap of the blog schema.
//!
//! Runs migrations, then inserts a fixed sample graph (users, tags, posts,
//! post/tag links, comments) if and only if the `users` table is empty.

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use serde::Serialize;
use tracing::{debug, info, instrument};

use models::{comment, post, post_tag, tag, user};
use crate::errors::ServiceError;

/// (username, email, password_hash)
const SEED_USERS: [(&str, &str, &str); 2] = [
    ("user1", "user1@example.com", "hashed_password_1"),
    ("user2", "user2@example.com", "hashed_password_2"),
];

const SEED_TAGS: [&str; 3] = ["technology", "programming", "web development"];

/// (author index, title, content, tag indexes)
const SEED_POSTS: [(usize, &str, &str, &[usize]); 3] = [
    (0, "First Post", "This is the content of the first post", &[0, 1]),
    (0, "Second Post", "This is the content of the second post", &[1, 2]),
    (1, "Another Post", "This is a post from another user", &[0]),
];

/// (post index, author index, content)
const SEED_COMMENTS: [(usize, usize, &str); 3] = [
    (0, 1, "Great post!"),
    (0, 0, "Thanks for the feedback!"),
    (1, 1, "Interesting thoughts"),
];

/// Row counts per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: u64,
    pub posts: u64,
    pub comments: u64,
    pub tags: u64,
    pub post_tags: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The sample graph was inserted; counts are taken after commit.
    Created(SeedReport),
    /// `users` already had rows; nothing was written.
    AlreadySeeded(SeedReport),
}

impl SeedOutcome {
    pub fn report(&self) -> SeedReport {
        match self {
            SeedOutcome::Created(r) | SeedOutcome::AlreadySeeded(r) => *r,
        }
    }
}

pub async fn count_rows<C: ConnectionTrait>(db: &C) -> Result<SeedReport, ServiceError> {
    Ok(SeedReport {
        users: user::Entity::find().count(db).await?,
        posts: post::Entity::find().count(db).await?,
        comments: comment::Entity::find().count(db).await?,
        tags: tag::Entity::find().count(db).await?,
        post_tags: post_tag::Entity::find().count(db).await?,
    })
}

/// Insert the sample graph in a single transaction when `users` is empty.
#[instrument(skip(db))]
pub async fn seed_if_empty(db: &DatabaseConnection) -> Result<SeedOutcome, ServiceError> {
    let existing = user::Entity::find().count(db).await?;
    if existing > 0 {
        info!(users = existing, "database already seeded, skipping");
        return Ok(SeedOutcome::AlreadySeeded(count_rows(db).await?));
    }

    // 任一步失败时 txn 被 drop，自动回滚
    let txn = db.begin().await?;
    insert_seed_graph(&txn).await?;
    txn.commit().await?;

    let report = count_rows(db).await?;
    info!(?report, "Sample data created successfully");
    Ok(SeedOutcome::Created(report))
}

async fn insert_seed_graph<C: ConnectionTrait>(db: &C) -> Result<(), ServiceError> {
    let mut users = Vec::with_capacity(SEED_USERS.len());
    for (username, email, hash) in SEED_USERS {
        users.push(user::create(db, username, email, hash).await?);
    }
    debug!(count = users.len(), "seed users inserted");

    let mut tags = Vec::with_capacity(SEED_TAGS.len());
    for name in SEED_TAGS {
        tags.push(tag::create(db, name).await?);
    }
    debug!(count = tags.len(), "seed tags inserted");

    let mut posts = Vec::with_capacity(SEED_POSTS.len());
    for (author, title, content, tag_idx) in SEED_POSTS {
        let p = post::create(db, users[author].id, title, content).await?;
        let tag_ids: Vec<i32> = tag_idx.iter().map(|&i| tags[i].id).collect();
        post::attach_tags(db, p.id, &tag_ids).await?;
        posts.push(p);
    }
    debug!(count = posts.len(), "seed posts inserted");

    for (post_idx, author, content) in SEED_COMMENTS {
        comment::create(db, posts[post_idx].id, users[author].id, content).await?;
    }
    debug!(count = SEED_COMMENTS.len(), "seed comments inserted");
    Ok(())
}

/// Connect, apply pending migrations and seed if empty.
pub async fn init_db(cfg: &DatabaseConfig) -> anyhow::Result<SeedOutcome> {
    bootstrap(cfg, false).await
}

/// Drop every table, re-run all migrations, then seed.
pub async fn init_db_fresh(cfg: &DatabaseConfig) -> anyhow::Result<SeedOutcome> {
    bootstrap(cfg, true).await
}

async fn bootstrap(cfg: &DatabaseConfig, fresh: bool) -> anyhow::Result<SeedOutcome> {
    common::env::ensure_sqlite_dir(&cfg.url).await?;
    let db = models::db::connect_with_config(cfg).await?;
    if fresh {
        info!("dropping and recreating schema");
        migration::Migrator::fresh(&db).await?;
    } else {
        migration::Migrator::up(&db, None).await?;
    }
    let outcome = seed_if_empty(&db).await?;
    db.close().await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ModelTrait;

    fn temp_config() -> DatabaseConfig {
        let path = std::env::temp_dir().join(format!("seed_test_{}.db", uuid::Uuid::new_v4()));
        DatabaseConfig { url: format!("sqlite://{}?mode=rwc", path.display()), ..Default::default() }
    }

    const FULL: SeedReport = SeedReport { users: 2, posts: 3, comments: 3, tags: 3, post_tags: 5 };

    #[tokio::test]
    async fn running_twice_leaves_one_copy() -> anyhow::Result<()> {
        let cfg = temp_config();

        let first = init_db(&cfg).await?;
        assert_eq!(first, SeedOutcome::Created(FULL));

        let second = init_db(&cfg).await?;
        assert_eq!(second, SeedOutcome::AlreadySeeded(FULL));
        Ok(())
    }

    #[tokio::test]
    async fn seeded_graph_has_expected_links() -> anyhow::Result<()> {
        let cfg = temp_config();
        init_db(&cfg).await?;
        let db = models::db::connect_with_config(&cfg).await?;

        let user1 = user::find_by_username(&db, "user1").await?.expect("user1");
        let mut titles: Vec<String> = user1.find_related(post::Entity).all(&db).await?.into_iter().map(|p| p.title).collect();
        titles.sort();
        assert_eq!(titles, vec!["First Post", "Second Post"]);

        let posts = post::Entity::find().all(&db).await?;
        let first = posts.iter().find(|p| p.title == "First Post").expect("first post");
        let tag_names: Vec<String> = post::tags_of(&db, first).await?.into_iter().map(|t| t.name).collect();
        assert_eq!(tag_names, vec!["technology", "programming"]);

        let comments: Vec<String> = post::comments_of(&db, first).await?.into_iter().map(|c| c.content).collect();
        assert_eq!(comments, vec!["Great post!", "Thanks for the feedback!"]);

        let another = posts.iter().find(|p| p.title == "Another Post").expect("another post");
        let user2 = user::find_by_username(&db, "user2").await?.expect("user2");
        assert_eq!(another.user_id, user2.id);
        Ok(())
    }

    #[tokio::test]
    async fn non_empty_users_table_is_left_alone() -> anyhow::Result<()> {
        let cfg = temp_config();
        let db = models::db::connect_with_config(&cfg).await?;
        migration::Migrator::up(&db, None).await?;
        user::create(&db, "someone", "someone@example.com", "h").await?;

        let outcome = seed_if_empty(&db).await?;
        assert_eq!(outcome.report(), SeedReport { users: 1, ..Default::default() });
        assert!(matches!(outcome, SeedOutcome::AlreadySeeded(_)));
        Ok(())
    }

    #[tokio::test]
    async fn failed_seed_rolls_back() -> anyhow::Result<()> {
        let cfg = temp_config();
        let db = models::db::connect_with_config(&cfg).await?;
        migration::Migrator::up(&db, None).await?;
        // users is empty, but the tag insert will hit the unique constraint
        tag::create(&db, "programming").await?;

        assert!(seed_if_empty(&db).await.is_err());
        assert_eq!(count_rows(&db).await?, SeedReport { tags: 1, ..Default::default() });
        Ok(())
    }

    #[tokio::test]
    async fn fresh_restores_the_sample_graph() -> anyhow::Result<()> {
        let cfg = temp_config();
        init_db(&cfg).await?;

        let db = models::db::connect_with_config(&cfg).await?;
        let user1 = user::find_by_username(&db, "user1").await?.expect("user1");
        user::delete_by_id(&db, user1.id).await?;
        assert_eq!(count_rows(&db).await?.posts, 1);
        db.close().await?;

        // the remaining user keeps the plain run from reseeding
        assert!(matches!(init_db(&cfg).await?, SeedOutcome::AlreadySeeded(_)));
        assert_eq!(init_db_fresh(&cfg).await?, SeedOutcome::Created(FULL));
        Ok(())
    }
}
