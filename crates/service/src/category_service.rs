use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use models::category;
use crate::errors::{require, ServiceError};
use crate::normalize::lenient_string;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
}

impl From<category::Model> for CategoryView {
    fn from(m: category::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryView>, ServiceError> {
    let rows = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(CategoryView::from).collect())
}

#[instrument(skip(db))]
pub async fn create_category(db: &DatabaseConnection, input: CategoryInput) -> Result<CategoryView, ServiceError> {
    let am = category::ActiveModel { name: Set(require(input.name, "name")?), ..Default::default() };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created.into())
}

#[instrument(skip(db))]
pub async fn update_category(db: &DatabaseConnection, id: i32, input: CategoryInput) -> Result<CategoryView, ServiceError> {
    let found = category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    let Some(name) = input.name else {
        return Ok(found.into());
    };
    let mut am: category::ActiveModel = found.into();
    am.name = Set(require(Some(name), "name")?);
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = category::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("category"));
    }
    Ok(())
}
