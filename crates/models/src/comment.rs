use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{post, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Post,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Post => Entity::belongs_to(post::Entity)
                .from(Column::PostId)
                .to(post::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
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

pub async fn create<C: ConnectionTrait>(db: &C, post_id: i32, user_id: i32, content: &str) -> Result<Model, errors::ModelError> {
    if content.trim().is_empty() { return Err(errors::ModelError::Validation("content required".into())); }
    let am = ActiveModel {
        id: ActiveValue::NotSet,
        post_id: Set(post_id),
        user_id: Set(user_id),
        content: Set(content.to_string()),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::NotSet,
    };
    Ok(am.insert(db).await?)
}
