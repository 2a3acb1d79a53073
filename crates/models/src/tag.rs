use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{post, post_tag};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PostTag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::PostTag => Entity::has_many(post_tag::Entity).into() }
    }
}

impl Related<post_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::PostTag.def() }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { post_tag::Relation::Post.def() }

    fn via() -> Option<RelationDef> { Some(post_tag::Relation::Tag.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("tag name required".into())); }
    if name.chars().count() > 50 { return Err(errors::ModelError::Validation("tag name longer than 50".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel { id: ActiveValue::NotSet, name: Set(name.to_string()) };
    Ok(am.insert(db).await?)
}
