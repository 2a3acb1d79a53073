use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{comment, post};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Posts,
    Comments,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Posts => Entity::has_many(post::Entity).into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Posts.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
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

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.trim().is_empty() { return Err(errors::ModelError::Validation("username required".into())); }
    if username.chars().count() > 50 { return Err(errors::ModelError::Validation("username longer than 50".into())); }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    if email.chars().count() > 100 { return Err(errors::ModelError::Validation("email longer than 100".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, username: &str, email: &str, password_hash: &str) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    validate_email(email)?;
    if password_hash.is_empty() { return Err(errors::ModelError::Validation("password hash required".into())); }
    let am = ActiveModel {
        id: ActiveValue::NotSet,
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: ActiveValue::NotSet,
        updated_at: ActiveValue::NotSet,
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

/// Remove a user; posts, comments and their tag links go with it via `ON DELETE CASCADE`.
/// Returns whether a row was removed.
pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
