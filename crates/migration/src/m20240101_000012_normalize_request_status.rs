//! Rewrite legacy free-text `service_request.status` values to the canonical
//! `pending | in_progress | completed` set. Unrecognized values are left alone.
//!
//! SQLite `lower()` only folds ASCII; the read path folds whatever slips past here.
use sea_orm_migration::prelude::*;

use crate::REQUEST_STATUS_ALIASES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();
        for (canonical, legacy) in REQUEST_STATUS_ALIASES {
            let stmt = Query::update()
                .table(ServiceRequest::Table)
                .value(ServiceRequest::Status, *canonical)
                .and_where(
                    Expr::expr(Func::lower(Expr::col(ServiceRequest::Status)))
                        .is_in(legacy.iter().copied()),
                )
                .to_owned();
            db.execute(backend.build(&stmt)).await?;
        }
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Data rewrite; the original spellings are not recoverable.
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ServiceRequest { Table, Status }
