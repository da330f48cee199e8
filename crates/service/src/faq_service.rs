use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use models::faq;
use crate::errors::{require, require_if_present, require_text, require_text_if_present, ServiceError};
use crate::normalize::{lenient_i32, lenient_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqView {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
}

impl From<faq::Model> for FaqView {
    fn from(m: faq::Model) -> Self {
        Self { id: m.id, question: m.question, answer: m.answer, display_order: m.display_order }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: Option<String>,
    #[serde(default, alias = "displayOrder", deserialize_with = "lenient_i32")]
    pub display_order: Option<i32>,
}

/// Ordered by `display_order`, ties broken by id.
pub async fn list_faqs(db: &DatabaseConnection) -> Result<Vec<FaqView>, ServiceError> {
    let rows = faq::Entity::find()
        .order_by_asc(faq::Column::DisplayOrder)
        .order_by_asc(faq::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(FaqView::from).collect())
}

#[instrument(skip(db, input))]
pub async fn create_faq(db: &DatabaseConnection, input: FaqInput) -> Result<FaqView, ServiceError> {
    let am = faq::ActiveModel {
        question: Set(require(input.question, "question")?),
        answer: Set(require_text(input.answer, "answer")?),
        display_order: Set(input.display_order.unwrap_or(0)),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created.into())
}

#[instrument(skip(db, input))]
pub async fn update_faq(db: &DatabaseConnection, id: i32, input: FaqInput) -> Result<FaqView, ServiceError> {
    let found = faq::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("faq"))?;
    let mut am: faq::ActiveModel = found.clone().into();
    if let Some(v) = require_if_present(input.question, "question")? { am.question = Set(v); }
    if let Some(v) = require_text_if_present(input.answer, "answer")? { am.answer = Set(v); }
    if let Some(v) = input.display_order { am.display_order = Set(v); }
    if !am.is_changed() {
        return Ok(found.into());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated.into())
}

#[instrument(skip(db))]
pub async fn delete_faq(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = faq::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("faq"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn faq_input(q: &str, order: Option<i32>) -> FaqInput {
        FaqInput { question: Some(q.into()), answer: Some("a".into()), display_order: order }
    }

    #[tokio::test]
    async fn faqs_sorted_by_display_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_faq(&db, faq_input("third", Some(5))).await?;
        create_faq(&db, faq_input("first", None)).await?;
        create_faq(&db, faq_input("second", Some(0))).await?;
        let order: Vec<String> = list_faqs(&db).await?.into_iter().map(|f| f.question).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
        Ok(())
    }

    #[tokio::test]
    async fn reorder_keeps_text() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = create_faq(&db, faq_input("q", None)).await?;
        let u = update_faq(&db, f.id, FaqInput { display_order: Some(3), ..Default::default() }).await?;
        assert_eq!((u.question.as_str(), u.answer.as_str(), u.display_order), ("q", "a", 3));
        assert!(matches!(update_faq(&db, 42, FaqInput::default()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn answer_keeps_its_whitespace() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = create_faq(&db, FaqInput { answer: Some(" - krok 1\n - krok 2\n".into()), ..faq_input("jak?", None) }).await?;
        assert_eq!(f.answer, " - krok 1\n - krok 2\n");
        let blank = update_faq(&db, f.id, FaqInput { answer: Some("   ".into()), ..Default::default() }).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
