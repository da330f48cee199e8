//! Service requests: orders for grave care placed from the public site and
//! managed from the admin console.
//!
//! Status labels are canonicalized on write and again on read, so rows written
//! before the status migration still display as `pending | in_progress | completed`.

use chrono::Local;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use models::{grave, service_request};
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::{
    lenient_f64, lenient_i32, lenient_string, patch_string, services_from_text, services_to_text, RequestStatus,
};

/// Wire form of a service request. Field casing follows the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestView {
    pub id: i32,
    #[serde(rename = "graveId")]
    pub grave_id: i32,
    #[serde(rename = "serviceType")]
    pub service_type: String,
    pub date: String,
    pub status: String,
    #[serde(rename = "contactName")]
    pub contact_name: Option<String>,
    #[serde(rename = "contactEmail")]
    pub contact_email: Option<String>,
    #[serde(rename = "contactPhone")]
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub scheduled_date: Option<String>,
    pub services: Vec<Value>,
    pub total_cost: Option<f64>,
    pub discount: f64,
    pub admin_notes: Option<String>,
}

impl From<service_request::Model> for ServiceRequestView {
    fn from(m: service_request::Model) -> Self {
        let services = services_from_text(m.services.as_deref());
        Self {
            id: m.id,
            grave_id: m.grave_id,
            service_type: m.service_type,
            date: m.date,
            status: RequestStatus::parse(&m.status).to_string(),
            contact_name: m.contact_name,
            contact_email: m.contact_email,
            contact_phone: m.contact_phone,
            notes: m.notes,
            scheduled_date: m.scheduled_date,
            services,
            total_cost: m.total_cost,
            discount: m.discount,
            admin_notes: m.admin_notes,
        }
    }
}

/// Create payload. Accepts both the site's camelCase and the older snake_case names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateServiceRequestInput {
    #[serde(default, rename = "graveId", alias = "grave_id", deserialize_with = "lenient_i32")]
    pub grave_id: Option<i32>,
    #[serde(default, rename = "serviceType", alias = "service_type", deserialize_with = "lenient_string")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, rename = "contactName", alias = "customer_name", deserialize_with = "lenient_string")]
    pub contact_name: Option<String>,
    #[serde(default, rename = "contactEmail", alias = "email", deserialize_with = "lenient_string")]
    pub contact_email: Option<String>,
    #[serde(default, rename = "contactPhone", alias = "phone", deserialize_with = "lenient_string")]
    pub contact_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
    #[serde(default, alias = "scheduledDate", deserialize_with = "lenient_string")]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub services: Option<Value>,
    #[serde(default, alias = "totalCost", deserialize_with = "lenient_f64")]
    pub total_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateServiceRequestInput {
    #[serde(default, rename = "graveId", alias = "grave_id", deserialize_with = "lenient_i32")]
    pub grave_id: Option<i32>,
    #[serde(default, rename = "serviceType", alias = "service_type", deserialize_with = "lenient_string")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, rename = "contactName", alias = "customer_name", deserialize_with = "patch_string")]
    pub contact_name: Option<Option<String>>,
    #[serde(default, rename = "contactEmail", alias = "email", deserialize_with = "patch_string")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, rename = "contactPhone", alias = "phone", deserialize_with = "patch_string")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub notes: Option<Option<String>>,
    #[serde(default, alias = "scheduledDate", deserialize_with = "patch_string")]
    pub scheduled_date: Option<Option<String>>,
    #[serde(default)]
    pub services: Option<Value>,
    #[serde(default, alias = "totalCost", deserialize_with = "lenient_f64")]
    pub total_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discount: Option<f64>,
    #[serde(default, deserialize_with = "patch_string")]
    pub admin_notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

async fn ensure_grave_exists(db: &DatabaseConnection, grave_id: i32) -> Result<(), ServiceError> {
    let found = grave::Entity::find_by_id(grave_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if found.is_none() {
        return Err(ServiceError::Validation(format!("grave {} does not exist", grave_id)));
    }
    Ok(())
}

async fn find_request(db: &DatabaseConnection, id: i32) -> Result<service_request::Model, ServiceError> {
    service_request::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service request"))
}

pub async fn list_service_requests(db: &DatabaseConnection) -> Result<Vec<ServiceRequestView>, ServiceError> {
    let rows = service_request::Entity::find()
        .order_by_asc(service_request::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(ServiceRequestView::from).collect())
}

pub async fn get_service_request(db: &DatabaseConnection, id: i32) -> Result<ServiceRequestView, ServiceError> {
    Ok(find_request(db, id).await?.into())
}

/// Create a request for an existing grave. Status defaults to `pending`,
/// date to today, discount to `0.0` and services to `[]`.
#[instrument(skip(db, input))]
pub async fn create_service_request(
    db: &DatabaseConnection,
    input: CreateServiceRequestInput,
) -> Result<ServiceRequestView, ServiceError> {
    let grave_id = input.grave_id.ok_or_else(|| ServiceError::required("graveId"))?;
    let service_type = require(input.service_type, "serviceType")?;
    ensure_grave_exists(db, grave_id).await?;

    let status = input.status.as_deref().map(RequestStatus::parse).unwrap_or_default();
    let services = input.services.as_ref().map(services_to_text).unwrap_or_else(|| "[]".to_string());
    let am = service_request::ActiveModel {
        grave_id: Set(grave_id),
        service_type: Set(service_type),
        date: Set(input.date.filter(|d| !d.trim().is_empty()).unwrap_or_else(today)),
        status: Set(status.to_string()),
        contact_name: Set(input.contact_name),
        contact_email: Set(input.contact_email),
        contact_phone: Set(input.contact_phone),
        notes: Set(input.notes),
        scheduled_date: Set(input.scheduled_date),
        services: Set(Some(services)),
        total_cost: Set(input.total_cost),
        discount: Set(input.discount.unwrap_or(0.0)),
        admin_notes: Set(input.admin_notes),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(request_id = created.id, grave_id, status = %status, "service_request_created");
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_service_request(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateServiceRequestInput,
) -> Result<ServiceRequestView, ServiceError> {
    let found = find_request(db, id).await?;
    let mut am: service_request::ActiveModel = found.clone().into();
    if let Some(grave_id) = input.grave_id {
        if grave_id != found.grave_id {
            ensure_grave_exists(db, grave_id).await?;
            am.grave_id = Set(grave_id);
        }
    }
    if let Some(v) = require_if_present(input.service_type, "serviceType")? { am.service_type = Set(v); }
    if let Some(v) = input.date.filter(|d| !d.trim().is_empty()) { am.date = Set(v); }
    if let Some(v) = input.status { am.status = Set(RequestStatus::parse(&v).to_string()); }
    if let Some(v) = input.contact_name { am.contact_name = Set(v); }
    if let Some(v) = input.contact_email { am.contact_email = Set(v); }
    if let Some(v) = input.contact_phone { am.contact_phone = Set(v); }
    if let Some(v) = input.notes { am.notes = Set(v); }
    if let Some(v) = input.scheduled_date { am.scheduled_date = Set(v); }
    if let Some(v) = input.services.as_ref() { am.services = Set(Some(services_to_text(v))); }
    if let Some(v) = input.total_cost { am.total_cost = Set(Some(v)); }
    if let Some(v) = input.discount { am.discount = Set(v); }
    if let Some(v) = input.admin_notes { am.admin_notes = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

/// Change only the status of a request.
#[instrument(skip(db))]
pub async fn update_status(db: &DatabaseConnection, id: i32, input: StatusInput) -> Result<ServiceRequestView, ServiceError> {
    let status = require(input.status, "status")?;
    update_service_request(db, id, UpdateServiceRequestInput { status: Some(status), ..Default::default() }).await
}

#[instrument(skip(db))]
pub async fn delete_service_request(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_request::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("service request"));
    }
    Ok(())
}
