use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::reservation;
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::{lenient_bool, lenient_string, patch_string};

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub section: Option<String>,
    pub plot_type: Option<String>,
    pub consultation: bool,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub status: String,
    pub scheduled_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<reservation::Model> for ReservationView {
    fn from(m: reservation::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            section: m.section,
            plot_type: m.plot_type,
            consultation: m.consultation,
            notes: m.notes,
            admin_notes: m.admin_notes,
            status: m.status,
            scheduled_date: m.scheduled_date,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReservationInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: Option<String>,
    #[serde(default, alias = "plotType", deserialize_with = "lenient_string")]
    pub plot_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub consultation: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub admin_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, alias = "scheduledDate", deserialize_with = "lenient_string")]
    pub scheduled_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReservationInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub section: Option<Option<String>>,
    #[serde(default, alias = "plotType", deserialize_with = "patch_string")]
    pub plot_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub consultation: Option<bool>,
    #[serde(default, deserialize_with = "patch_string")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub admin_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, alias = "scheduledDate", deserialize_with = "patch_string")]
    pub scheduled_date: Option<Option<String>>,
}

/// Newest first, the order the admin console shows them in.
pub async fn list_reservations(db: &DatabaseConnection) -> Result<Vec<ReservationView>, ServiceError> {
    let rows = reservation::Entity::find()
        .order_by_desc(reservation::Column::CreatedAt)
        .order_by_desc(reservation::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(ReservationView::from).collect())
}

#[instrument(skip(db, input))]
pub async fn create_reservation(db: &DatabaseConnection, input: CreateReservationInput) -> Result<ReservationView, ServiceError> {
    let am = reservation::ActiveModel {
        name: Set(require(input.name, "name")?),
        email: Set(require(input.email, "email")?),
        phone: Set(require(input.phone, "phone")?),
        section: Set(input.section),
        plot_type: Set(input.plot_type),
        consultation: Set(input.consultation.unwrap_or(false)),
        notes: Set(input.notes),
        admin_notes: Set(input.admin_notes),
        status: Set(input.status.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| DEFAULT_STATUS.to_string())),
        scheduled_date: Set(input.scheduled_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(reservation_id = created.id, "reservation_created");
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_reservation(db: &DatabaseConnection, id: i32, input: UpdateReservationInput) -> Result<ReservationView, ServiceError> {
    let found = reservation::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("reservation"))?;
    let mut am: reservation::ActiveModel = found.clone().into();
    if let Some(v) = require_if_present(input.name, "name")? { am.name = Set(v); }
    if let Some(v) = require_if_present(input.email, "email")? { am.email = Set(v); }
    if let Some(v) = require_if_present(input.phone, "phone")? { am.phone = Set(v); }
    if let Some(v) = input.section { am.section = Set(v); }
    if let Some(v) = input.plot_type { am.plot_type = Set(v); }
    if let Some(v) = input.consultation { am.consultation = Set(v); }
    if let Some(v) = input.notes { am.notes = Set(v); }
    if let Some(v) = input.admin_notes { am.admin_notes = Set(v); }
    if let Some(v) = input.status.filter(|s| !s.trim().is_empty()) { am.status = Set(v); }
    if let Some(v) = input.scheduled_date { am.scheduled_date = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_reservation(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = reservation::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("reservation"));
    }
    Ok(())
}
