use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use super::setup_test_db;
use crate::{errors::ModelError, faq, grave, service_request, user};

fn sample_grave(name: &str) -> grave::ActiveModel {
    grave::ActiveModel {
        name: Set(name.to_string()),
        section: Set(Some("A".into())),
        coord_x: Set(3),
        coord_y: Set(4),
        ..Default::default()
    }
}

/// Test user CRUD operations
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, "  alice ", "hash", "User").await?;
    assert_eq!(created.username, "alice");
    assert_eq!(created.role, "user");
    assert!(!created.is_protected());

    let found = user::find_by_username(&db, "alice").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(user::find_by_username(&db, "bob").await?.is_none());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(matches!(user::create(&db, " ", "hash", "user").await, Err(ModelError::Validation(_))));
    assert!(matches!(user::create(&db, "carol", "hash", "root").await, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_username_unique_constraint() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, "dave", "hash", "user").await?;
    assert!(matches!(user::create(&db, "dave", "hash", "user").await, Err(ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn test_grave_crud_and_coordinates() -> Result<()> {
    let db = setup_test_db().await?;

    let g = sample_grave("Jan Kowalski").insert(&db).await?;
    assert_eq!(g.coordinates(), "3,4");

    let mut am: grave::ActiveModel = g.clone().into();
    am.name = Set("Jan Nowak".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.name, "Jan Nowak");
    assert_eq!(updated.section.as_deref(), Some("A"));

    grave::Entity::delete_by_id(g.id).exec(&db).await?;
    assert_eq!(grave::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_service_requests_cascade_with_grave() -> Result<()> {
    let db = setup_test_db().await?;
    let g = sample_grave("Anna").insert(&db).await?;

    let req = service_request::ActiveModel {
        grave_id: Set(g.id),
        service_type: Set("cleaning".into()),
        date: Set("2024-05-01".into()),
        status: Set("pending".into()),
        discount: Set(0.0),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(req.grave_id, g.id);

    grave::Entity::delete_by_id(g.id).exec(&db).await?;
    assert!(service_request::Entity::find_by_id(req.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_service_request_rejects_unknown_grave() -> Result<()> {
    let db = setup_test_db().await?;
    let res = service_request::ActiveModel {
        grave_id: Set(999),
        service_type: Set("cleaning".into()),
        date: Set("2024-05-01".into()),
        status: Set("pending".into()),
        discount: Set(0.0),
        ..Default::default()
    }
    .insert(&db)
    .await;
    assert!(res.is_err(), "foreign key should reject unknown grave");
    Ok(())
}

#[tokio::test]
async fn test_faq_defaults() -> Result<()> {
    let db = setup_test_db().await?;
    let f = faq::ActiveModel {
        question: Set("Q?".into()),
        answer: Set("A.".into()),
        display_order: Set(0),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(f.display_order, 0);
    Ok(())
}
