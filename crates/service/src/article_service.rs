use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use models::article;
use crate::errors::{require, require_if_present, require_text, require_text_if_present, ServiceError};
use crate::normalize::{lenient_bool, lenient_string, patch_string};
use crate::Visibility;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub read_time: Option<String>,
    pub is_visible: bool,
}

impl From<article::Model> for ArticleView {
    fn from(m: article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            category: m.category,
            date: m.date,
            excerpt: m.excerpt,
            read_time: m.read_time,
            is_visible: m.is_visible,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub excerpt: Option<String>,
    #[serde(default, alias = "read_time", deserialize_with = "lenient_string")]
    pub read_time: Option<String>,
    #[serde(default, alias = "is_visible", deserialize_with = "lenient_bool")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "patch_string")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_string")]
    pub excerpt: Option<Option<String>>,
    #[serde(default, alias = "read_time", deserialize_with = "patch_string")]
    pub read_time: Option<Option<String>>,
    #[serde(default, alias = "is_visible", deserialize_with = "lenient_bool")]
    pub is_visible: Option<bool>,
}

/// Public callers only see visible articles; admins see everything.
pub async fn list_articles(db: &DatabaseConnection, visibility: Visibility) -> Result<Vec<ArticleView>, ServiceError> {
    let mut q = article::Entity::find();
    if visibility == Visibility::Public {
        q = q.filter(article::Column::IsVisible.eq(true));
    }
    let rows = q
        .order_by_asc(article::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(ArticleView::from).collect())
}

#[instrument(skip(db, input))]
pub async fn create_article(db: &DatabaseConnection, input: CreateArticleInput) -> Result<ArticleView, ServiceError> {
    let am = article::ActiveModel {
        title: Set(require(input.title, "title")?),
        content: Set(require_text(input.content, "content")?),
        category: Set(input.category),
        date: Set(input.date),
        excerpt: Set(input.excerpt),
        read_time: Set(input.read_time),
        is_visible: Set(input.is_visible.unwrap_or(true)),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_article(db: &DatabaseConnection, id: i32, input: UpdateArticleInput) -> Result<ArticleView, ServiceError> {
    let found = article::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("article"))?;
    let mut am: article::ActiveModel = found.clone().into();
    if let Some(v) = require_if_present(input.title, "title")? { am.title = Set(v); }
    if let Some(v) = require_text_if_present(input.content, "content")? { am.content = Set(v); }
    if let Some(v) = input.category { am.category = Set(v); }
    if let Some(v) = input.date { am.date = Set(v); }
    if let Some(v) = input.excerpt { am.excerpt = Set(v); }
    if let Some(v) = input.read_time { am.read_time = Set(v); }
    if let Some(v) = input.is_visible { am.is_visible = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_article(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = article::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("article"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use serde_json::json;

    #[tokio::test]
    async fn hidden_articles_only_reach_admins() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let shown = create_article(&db, serde_json::from_value(json!({"title": "Open", "content": "c", "readTime": "3 min"}))?).await?;
        assert!(shown.is_visible);
        assert_eq!(shown.read_time.as_deref(), Some("3 min"));
        create_article(&db, serde_json::from_value(json!({"title": "Draft", "content": "c", "isVisible": false}))?).await?;

        assert_eq!(list_articles(&db, Visibility::Public).await?.len(), 1);
        assert_eq!(list_articles(&db, Visibility::Admin).await?.len(), 2);

        update_article(&db, shown.id, serde_json::from_value(json!({"isVisible": false}))?).await?;
        assert!(list_articles(&db, Visibility::Public).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn title_and_content_are_required() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_article(&db, serde_json::from_value(json!({"title": "t"}))?).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let a = create_article(&db, serde_json::from_value(json!({"title": "t", "content": "c"}))?).await?;
        let err = update_article(&db, a.id, serde_json::from_value(json!({"title": ""}))?).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(update_article(&db, a.id, UpdateArticleInput::default()).await?.title, "t");
        Ok(())
    }

    #[tokio::test]
    async fn content_is_stored_as_sent() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let body = "  Wstęp\n\n    wcięty akapit\n";
        let a = create_article(&db, serde_json::from_value(json!({"title": " t ", "content": body}))?).await?;
        assert_eq!(a.title, "t");
        assert_eq!(a.content, body);
        let err = update_article(&db, a.id, serde_json::from_value(json!({"content": "  \n "}))?).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
