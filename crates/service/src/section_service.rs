use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use models::section;
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::{lenient_i32, lenient_string, patch_string};

const DEFAULT_GRID: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub rows: i32,
    pub cols: i32,
}

impl From<section::Model> for SectionView {
    fn from(m: section::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, rows: m.rows, cols: m.cols }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSectionInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub rows: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub cols: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSectionInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub rows: Option<i32>,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub cols: Option<i32>,
}

pub async fn list_sections(db: &DatabaseConnection) -> Result<Vec<SectionView>, ServiceError> {
    let rows = section::Entity::find()
        .order_by_asc(section::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(SectionView::from).collect())
}

#[instrument(skip(db, input))]
pub async fn create_section(db: &DatabaseConnection, input: CreateSectionInput) -> Result<SectionView, ServiceError> {
    let am = section::ActiveModel {
        name: Set(require(input.name, "name")?),
        description: Set(input.description),
        rows: Set(input.rows.unwrap_or(DEFAULT_GRID)),
        cols: Set(input.cols.unwrap_or(DEFAULT_GRID)),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_section(db: &DatabaseConnection, id: i32, input: UpdateSectionInput) -> Result<SectionView, ServiceError> {
    let found = section::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("section"))?;
    let mut am: section::ActiveModel = found.clone().into();
    if let Some(name) = require_if_present(input.name, "name")? { am.name = Set(name); }
    if let Some(v) = input.description { am.description = Set(v); }
    if let Some(v) = input.rows { am.rows = Set(v); }
    if let Some(v) = input.cols { am.cols = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_section(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = section::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("section"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    #[tokio::test]
    async fn section_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_section(&db, serde_json::from_value(json!({"name": "A", "rows": 10, "cols": "12"}))?).await?;
        assert_eq!((s.rows, s.cols), (10, 12));

        let u = update_section(&db, s.id, serde_json::from_value(json!({"description": "Old part"}))?).await?;
        assert_eq!(u.name, "A");
        assert_eq!(u.description.as_deref(), Some("Old part"));
        assert_eq!(u.rows, 10);

        assert_eq!(list_sections(&db).await?.len(), 1);
        delete_section(&db, s.id).await?;
        assert!(list_sections(&db).await?.is_empty());
        assert!(matches!(delete_section(&db, s.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn grid_defaults_to_ten() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_section(&db, CreateSectionInput { name: Some("C".into()), ..Default::default() }).await?;
        assert_eq!((s.rows, s.cols), (10, 10));
        assert!(create_section(&db, CreateSectionInput::default()).await.is_err());
        Ok(())
    }
}
