//! Offered services (the priced catalogue), table `service`.
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use models::service_item;
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::{lenient_f64, lenient_string, patch_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItemView {
    pub id: i32,
    pub name: String,
    pub slug: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl From<service_item::Model> for ServiceItemView {
    fn from(m: service_item::Model) -> Self {
        Self { id: m.id, name: m.name, slug: m.slug, price: m.price, category: m.category }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateServiceItemInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateServiceItemInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub slug: Option<Option<String>>,
    /// Non-numeric prices are ignored.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "patch_string")]
    pub category: Option<Option<String>>,
}

pub async fn list_service_items(db: &DatabaseConnection) -> Result<Vec<ServiceItemView>, ServiceError> {
    let rows = service_item::Entity::find()
        .order_by_asc(service_item::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(ServiceItemView::from).collect())
}

#[instrument(skip(db, input))]
pub async fn create_service_item(db: &DatabaseConnection, input: CreateServiceItemInput) -> Result<ServiceItemView, ServiceError> {
    let am = service_item::ActiveModel {
        name: Set(require(input.name, "name")?),
        slug: Set(input.slug),
        price: Set(input.price),
        category: Set(input.category),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_service_item(db: &DatabaseConnection, id: i32, input: UpdateServiceItemInput) -> Result<ServiceItemView, ServiceError> {
    let found = service_item::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    let mut am: service_item::ActiveModel = found.clone().into();
    if let Some(v) = require_if_present(input.name, "name")? { am.name = Set(v); }
    if let Some(v) = input.slug { am.slug = Set(v); }
    if let Some(v) = input.price { am.price = Set(Some(v)); }
    if let Some(v) = input.category { am.category = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_service_item(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_item::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("service"));
    }
    Ok(())
}
