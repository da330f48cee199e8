//! Create `service_request` table with FK to `grave`.
//!
//! `services` holds a JSON array serialized as text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRequest::Id))
                    .col(integer(ServiceRequest::GraveId).not_null())
                    .col(string_len(ServiceRequest::ServiceType, 50).not_null())
                    .col(string_len(ServiceRequest::Date, 20).not_null())
                    .col(string_len(ServiceRequest::Status, 20).not_null().default("pending"))
                    .col(string_len_null(ServiceRequest::ContactName, 100))
                    .col(string_len_null(ServiceRequest::ContactEmail, 100))
                    .col(string_len_null(ServiceRequest::ContactPhone, 20))
                    .col(text_null(ServiceRequest::Notes))
                    .col(string_len_null(ServiceRequest::ScheduledDate, 20))
                    .col(text_null(ServiceRequest::Services))
                    .col(double_null(ServiceRequest::TotalCost))
                    .col(double(ServiceRequest::Discount).not_null().default(0.0))
                    .col(text_null(ServiceRequest::AdminNotes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_grave")
                            .from(ServiceRequest::Table, ServiceRequest::GraveId)
                            .to(Grave::Table, Grave::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRequest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRequest {
    Table,
    Id,
    GraveId,
    ServiceType,
    Date,
    Status,
    ContactName,
    ContactEmail,
    ContactPhone,
    Notes,
    ScheduledDate,
    Services,
    TotalCost,
    Discount,
    AdminNotes,
}

#[derive(DeriveIden)]
enum Grave { Table, Id }
