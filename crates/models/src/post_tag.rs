use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{post, tag};

/// Join row of the post <-> tag many-to-many relation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Post,
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Post => Entity::belongs_to(post::Entity)
                .from(Column::PostId)
                .to(post::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Tag => Entity::belongs_to(tag::Entity)
                .from(Column::TagId)
                .to(tag::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tag.def() }
}

impl ActiveModelBehavior for ActiveModel {}
