//! SeaORM entities for the blog schema: users, posts, comments, tags and the
//! post/tag association, plus connection helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod post;
pub mod comment;
pub mod tag;
pub mod post_tag;

pub(crate) fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

#[cfg(test)]
mod tests;
