use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Username that can never be deleted.
pub const PROTECTED_USERNAME: &str = "admin";

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_protected(&self) -> bool {
        self.username == PROTECTED_USERNAME
    }
}

pub fn validate_role(role: &str) -> Result<String, errors::ModelError> {
    let r = role.trim().to_ascii_lowercase();
    if r != ROLE_USER && r != ROLE_ADMIN {
        return Err(errors::ModelError::Validation("role must be user or admin".into()));
    }
    Ok(r)
}

/// Insert a user with an already-hashed password.
pub async fn create(db: &DatabaseConnection, username: &str, password_hash: &str, role: &str) -> Result<Model, errors::ModelError> {
    if username.trim().is_empty() { return Err(errors::ModelError::Validation("username required".into())); }
    if password_hash.is_empty() { return Err(errors::ModelError::Validation("password required".into())); }
    let am = ActiveModel {
        username: Set(username.trim().to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(validate_role(role)?),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
