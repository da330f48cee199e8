use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::contact_message;
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::{lenient_string, patch_string};

pub const DEFAULT_STATUS: &str = "unread";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessageView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<contact_message::Model> for ContactMessageView {
    fn from(m: contact_message::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            message: m.message,
            status: m.status,
            admin_notes: m.admin_notes,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContactInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

/// Admin-side edits: triage status and notes, plus corrections to the sender fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub admin_notes: Option<Option<String>>,
}

/// Newest first.
pub async fn list_messages(db: &DatabaseConnection) -> Result<Vec<ContactMessageView>, ServiceError> {
    let rows = contact_message::Entity::find()
        .order_by_desc(contact_message::Column::CreatedAt)
        .order_by_desc(contact_message::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(ContactMessageView::from).collect())
}

#[instrument(skip(db, input))]
pub async fn create_message(db: &DatabaseConnection, input: CreateContactInput) -> Result<ContactMessageView, ServiceError> {
    let am = contact_message::ActiveModel {
        name: Set(require(input.name, "name")?),
        email: Set(require(input.email, "email")?),
        phone: Set(input.phone),
        message: Set(require(input.message, "message")?),
        status: Set(DEFAULT_STATUS.to_string()),
        admin_notes: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(message_id = created.id, "contact_message_received");
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_message(db: &DatabaseConnection, id: i32, input: UpdateContactInput) -> Result<ContactMessageView, ServiceError> {
    let found = contact_message::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("message"))?;
    let mut am: contact_message::ActiveModel = found.clone().into();
    if let Some(v) = require_if_present(input.name, "name")? { am.name = Set(v); }
    if let Some(v) = require_if_present(input.email, "email")? { am.email = Set(v); }
    if let Some(v) = input.phone { am.phone = Set(v); }
    if let Some(v) = require_if_present(input.message, "message")? { am.message = Set(v); }
    if let Some(v) = input.status.filter(|s| !s.trim().is_empty()) { am.status = Set(v); }
    if let Some(v) = input.admin_notes { am.admin_notes = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_message(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = contact_message::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("message"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    #[tokio::test]
    async fn message_lifecycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let m = create_message(&db, serde_json::from_value(json!({"name": "Ola", "email": "o@x.pl", "message": "Hello"}))?).await?;
        assert_eq!(m.status, "unread");
        assert_eq!(m.phone, None);

        let u = update_message(&db, m.id, serde_json::from_value(json!({"status": "read", "admin_notes": "answered by phone"}))?).await?;
        assert_eq!(u.status, "read");
        assert_eq!(u.message, "Hello");
        assert_eq!(u.admin_notes.as_deref(), Some("answered by phone"));

        delete_message(&db, m.id).await?;
        assert!(list_messages(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn message_body_is_required() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_message(&db, serde_json::from_value(json!({"name": "Ola", "email": "o@x.pl"}))?).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
