use std::time::Duration;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set, Statement};

use super::setup_test_db;
use crate::db::{connect_with_config, DatabaseConfig};
use crate::{grave, service_request};

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let db = setup_test_db().await?;
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(backend, "SELECT 1 AS test".to_string()))
        .await?
        .expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

#[tokio::test]
async fn test_all_tables_created() -> Result<()> {
    let db = setup_test_db().await?;
    let backend = db.get_database_backend();
    for table in [
        "user",
        "grave",
        "section",
        "service_request",
        "reservation",
        "article",
        "service",
        "contact_message",
        "faq",
        "category",
    ] {
        let row = db
            .query_one(Statement::from_sql_and_values(
                backend,
                "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table.into()],
            ))
            .await?
            .expect("count row");
        let n: i32 = row.try_get("", "n")?;
        assert_eq!(n, 1, "table {table} missing");
    }
    Ok(())
}

/// Legacy status labels stored before the normalization migration are rewritten by it
#[tokio::test]
async fn test_status_migration_rewrites_legacy_rows() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    // everything up to and including the index migration
    migration::Migrator::up(&db, Some(11)).await?;

    let g = grave::ActiveModel {
        name: Set("Anna".into()),
        coord_x: Set(0),
        coord_y: Set(0),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    for status in ["Oczekujące", "W trakcie", "zakonczone", "anulowane"] {
        service_request::ActiveModel {
            grave_id: Set(g.id),
            service_type: Set("cleaning".into()),
            date: Set("2024-05-01".into()),
            status: Set(status.into()),
            discount: Set(0.0),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    migration::Migrator::up(&db, None).await?;
    assert!(migration::Migrator::get_pending_migrations(&db).await?.is_empty());

    let statuses: Vec<String> = service_request::Entity::find()
        .order_by_asc(service_request::Column::Id)
        .all(&db)
        .await?
        .into_iter()
        .map(|r| r.status)
        .collect();
    assert_eq!(statuses, vec!["pending", "in_progress", "completed", "anulowane"]);
    Ok(())
}

#[test]
fn test_config_conversion() {
    let cfg = configs::DatabaseConfig {
        url: "sqlite::memory:".into(),
        connect_timeout_secs: 7,
        ..Default::default()
    };
    let db_cfg = DatabaseConfig::from(&cfg);
    assert_eq!(db_cfg.connect_timeout, Duration::from_secs(7));
    assert_eq!(db_cfg.max_connections, 5);

    let mem = DatabaseConfig::in_memory();
    assert_eq!(mem.max_connections, 1);
    assert_eq!(mem.min_connections, 1);
}
