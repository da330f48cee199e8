use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use models::user;
use crate::auth::password::hash_password;
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::lenient_string;

/// Wire form of a user; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<user::Model> for UserView {
    fn from(m: user::Model) -> Self {
        Self { id: m.id, username: m.username, role: m.role }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    /// Re-hashed when present and non-empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
}

fn hash(plain: &str) -> Result<String, ServiceError> {
    hash_password(plain).map_err(|e| ServiceError::Internal(e.to_string()))
}

async fn ensure_username_free(db: &DatabaseConnection, username: &str) -> Result<(), ServiceError> {
    if user::find_by_username(db, username).await?.is_some() {
        return Err(ServiceError::Conflict(format!("username '{}' already exists", username)));
    }
    Ok(())
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserView>, ServiceError> {
    let rows = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(UserView::from).collect())
}

/// Create a user; role defaults to `user`. Duplicate usernames are a conflict.
#[instrument(skip(db, input), fields(username = ?input.username))]
pub async fn create_user(db: &DatabaseConnection, input: CreateUserInput) -> Result<UserView, ServiceError> {
    let username = require(input.username, "username")?;
    let password = input.password.filter(|p| !p.is_empty()).ok_or_else(|| ServiceError::required("password"))?;
    let role = user::validate_role(input.role.as_deref().unwrap_or(user::ROLE_USER))?;
    ensure_username_free(db, &username).await?;
    let created = user::create(db, &username, &hash(&password)?, &role).await?;
    info!(user_id = created.id, "user_created");
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_user(db: &DatabaseConnection, id: i32, input: UpdateUserInput) -> Result<UserView, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    let mut am: user::ActiveModel = found.clone().into();
    if let Some(username) = require_if_present(input.username, "username")? {
        if username != found.username {
            if found.is_protected() {
                return Err(ServiceError::Validation("the admin user cannot be renamed".into()));
            }
            ensure_username_free(db, &username).await?;
            am.username = Set(username);
        }
    }
    if let Some(password) = input.password.filter(|p| !p.is_empty()) {
        am.password_hash = Set(hash(&password)?);
    }
    if let Some(role) = input.role {
        am.role = Set(user::validate_role(&role)?);
    }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

/// Delete a user. The `admin` account is never deleted.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    if found.is_protected() {
        warn!(user_id = id, "refused to delete admin user");
        return Err(ServiceError::Validation("cannot delete the admin user".into()));
    }
    user::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::test_support::get_db;
    use sea_orm::PaginatorTrait;

    fn input(username: &str, password: &str) -> CreateUserInput {
        CreateUserInput { username: Some(username.into()), password: Some(password.into()), role: None }
    }

    #[tokio::test]
    async fn user_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = create_user(&db, input("ola", "secret")).await?;
        assert_eq!(u.role, "user");

        let stored = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
        assert!(verify_password("secret", &stored.password_hash)?);

        let upd = update_user(
            &db,
            u.id,
            UpdateUserInput { username: Some("ola2".into()), password: Some("changed".into()), role: Some("admin".into()) },
        )
        .await?;
        assert_eq!(upd, UserView { id: u.id, username: "ola2".into(), role: "admin".into() });
        let stored = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
        assert!(verify_password("changed", &stored.password_hash)?);

        delete_user(&db, u.id).await?;
        assert!(list_users(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_usernames_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_user(&db, input("ola", "a")).await?;
        let other = create_user(&db, input("ewa", "b")).await?;
        assert!(matches!(create_user(&db, input("ola", "c")).await, Err(ServiceError::Conflict(_))));
        let rename = update_user(&db, other.id, UpdateUserInput { username: Some("ola".into()), ..Default::default() }).await;
        assert!(matches!(rename, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn admin_cannot_be_deleted() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let admin = create_user(&db, CreateUserInput { role: Some("admin".into()), ..input("admin", "admin123") }).await?;
        assert!(matches!(delete_user(&db, admin.id).await, Err(ServiceError::Validation(_))));
        let rename = update_user(&db, admin.id, UpdateUserInput { username: Some("root".into()), ..Default::default() }).await;
        assert!(matches!(rename, Err(ServiceError::Validation(_))));
        assert_eq!(user::Entity::find().count(&db).await?, 1);
        assert!(matches!(delete_user(&db, 999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn password_and_role_are_validated() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let missing = create_user(&db, CreateUserInput { username: Some("x".into()), ..Default::default() }).await;
        assert!(matches!(missing, Err(ServiceError::Validation(_))));
        let bad_role = create_user(&db, CreateUserInput { role: Some("owner".into()), ..input("y", "pw") }).await;
        assert!(matches!(bad_role, Err(ServiceError::Model(_))));
        Ok(())
    }
}
