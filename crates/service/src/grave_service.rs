use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use models::grave;
use crate::errors::{require, require_if_present, ServiceError};
use crate::normalize::{lenient_string, patch_string, Coordinates};

/// Wire form of a grave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraveView {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub section: Option<String>,
    pub row: Option<String>,
    pub plot: Option<String>,
    pub coordinates: String,
}

impl From<grave::Model> for GraveView {
    fn from(m: grave::Model) -> Self {
        let coordinates = m.coordinates();
        Self {
            id: m.id,
            name: m.name,
            birth_date: m.birth_date,
            death_date: m.death_date,
            section: m.section,
            row: m.row,
            plot: m.plot,
            coordinates,
        }
    }
}

/// Optional search filters for the grave listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraveFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive exact section label.
    pub section: Option<String>,
    /// Substring of the death date, typically a year.
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGraveInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub death_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub row: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub plot: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGraveInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub death_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub section: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub row: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub plot: Option<Option<String>>,
    #[serde(default)]
    pub coordinates: Option<Value>,
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `%fragment%` with LIKE metacharacters in the fragment matched literally.
fn contains_pattern(fragment: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

/// List graves in id order, narrowed by any non-blank filter.
#[instrument(skip(db))]
pub async fn list_graves(db: &DatabaseConnection, filter: &GraveFilter) -> Result<Vec<GraveView>, ServiceError> {
    let mut q = grave::Entity::find();
    if let Some(name) = non_blank(&filter.name) {
        // SQLite LIKE is case-insensitive for ASCII
        q = q.filter(Expr::col(grave::Column::Name).like(contains_pattern(name)));
    }
    if let Some(section) = non_blank(&filter.section) {
        q = q.filter(Expr::expr(Func::lower(Expr::col(grave::Column::Section))).eq(section.to_lowercase()));
    }
    if let Some(year) = non_blank(&filter.year) {
        q = q.filter(Expr::col(grave::Column::DeathDate).like(contains_pattern(year)));
    }
    let rows = q
        .order_by_asc(grave::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(GraveView::from).collect())
}

pub async fn get_grave(db: &DatabaseConnection, id: i32) -> Result<GraveView, ServiceError> {
    grave::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .map(GraveView::from)
        .ok_or_else(|| ServiceError::not_found("grave"))
}

/// Create a grave; coordinates default to `0,0`.
#[instrument(skip(db, input))]
pub async fn create_grave(db: &DatabaseConnection, input: CreateGraveInput) -> Result<GraveView, ServiceError> {
    let name = require(input.name, "name")?;
    let coords = input.coordinates.as_ref().map(Coordinates::from_value).unwrap_or_default();
    let am = grave::ActiveModel {
        name: Set(name),
        birth_date: Set(input.birth_date),
        death_date: Set(input.death_date),
        section: Set(input.section),
        row: Set(input.row),
        plot: Set(input.plot),
        coord_x: Set(coords.x),
        coord_y: Set(coords.y),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(grave_id = created.id, "grave_created");
    Ok(created.into())
}

/// Partial update; omitted fields keep their stored value.
#[instrument(skip(db, input))]
pub async fn update_grave(db: &DatabaseConnection, id: i32, input: UpdateGraveInput) -> Result<GraveView, ServiceError> {
    let found = grave::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("grave"))?;
    let mut am: grave::ActiveModel = found.clone().into();
    if let Some(name) = require_if_present(input.name, "name")? { am.name = Set(name); }
    if let Some(v) = input.birth_date { am.birth_date = Set(v); }
    if let Some(v) = input.death_date { am.death_date = Set(v); }
    if let Some(v) = input.section { am.section = Set(v); }
    if let Some(v) = input.row { am.row = Set(v); }
    if let Some(v) = input.plot { am.plot = Set(v); }
    if let Some(raw) = input.coordinates.as_ref() {
        let c = Coordinates::from_value(raw);
        am.coord_x = Set(c.x);
        am.coord_y = Set(c.y);
    }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

/// Delete a grave; its service requests go with it.
#[instrument(skip(db))]
pub async fn delete_grave(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = grave::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("grave"));
    }
    info!(grave_id = id, "grave_deleted");
    Ok(())
}
