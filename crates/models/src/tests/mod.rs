/// Database connection and migration tests
pub mod db_tests;

/// CRUD operations tests for the entity models
pub mod crud_tests;

use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, migrate, DatabaseConfig};

/// Fresh in-memory database with every migration applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migrate(&db).await?;
    Ok(db)
}
