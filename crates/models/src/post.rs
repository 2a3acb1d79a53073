use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{comment, post_tag, tag, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Comments,
    PostTag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::PostTag => Entity::has_many(post_tag::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl Related<post_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::PostTag.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { post_tag::Relation::Tag.def() }

    fn via() -> Option<RelationDef> { Some(post_tag::Relation::Post.def().rev()) }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = crate::now();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    if title.chars().count() > 255 { return Err(errors::ModelError::Validation("title longer than 255".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: i32, title: &str, content: &str) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    let am = ActiveModel {
        id: ActiveValue::NotSet,
        user_id: Set(user_id),
        title: Set(title.to_string()),
        content: Set(content.to_string()),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::NotSet,
    };
    Ok(am.insert(db).await?)
}

/// Link a post to the given tags. Returns the number of links written.
pub async fn attach_tags<C: ConnectionTrait>(db: &C, post_id: i32, tag_ids: &[i32]) -> Result<u64, errors::ModelError> {
    if tag_ids.is_empty() {
        return Ok(0);
    }
    let links = tag_ids.iter().map(|&tag_id| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    });
    let written = post_tag::Entity::insert_many(links).exec_without_returning(db).await?;
    Ok(written)
}

/// Tags of a post, ordered by tag id.
pub async fn tags_of<C: ConnectionTrait>(db: &C, post: &Model) -> Result<Vec<tag::Model>, errors::ModelError> {
    Ok(post.find_related(tag::Entity).order_by_asc(tag::Column::Id).all(db).await?)
}

/// Comments on a post, oldest first.
pub async fn comments_of<C: ConnectionTrait>(db: &C, post: &Model) -> Result<Vec<comment::Model>, errors::ModelError> {
    Ok(post.find_related(comment::Entity).order_by_asc(comment::Column::Id).all(db).await?)
}
