//! Migrator registering the blog schema in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users;
mod m20240601_000002_create_tags;
mod m20240601_000003_create_posts;
mod m20240601_000004_create_comments;
mod m20240601_000005_create_post_tag;
mod m20240601_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users::Migration),
            Box::new(m20240601_000002_create_tags::Migration),
            Box::new(m20240601_000003_create_posts::Migration),
            Box::new(m20240601_000004_create_comments::Migration),
            Box::new(m20240601_000005_create_post_tag::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000006_add_indexes::Migration),
        ]
    }
}
