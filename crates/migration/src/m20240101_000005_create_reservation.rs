//! Create `reservation` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(string_len(Reservation::Name, 100).not_null())
                    .col(string_len(Reservation::Email, 100).not_null())
                    .col(string_len(Reservation::Phone, 20).not_null())
                    .col(string_len_null(Reservation::Section, 50))
                    .col(string_len_null(Reservation::PlotType, 50))
                    .col(boolean(Reservation::Consultation).not_null().default(false))
                    .col(text_null(Reservation::Notes))
                    .col(text_null(Reservation::AdminNotes))
                    .col(string_len(Reservation::Status, 20).not_null().default("pending"))
                    .col(string_len_null(Reservation::ScheduledDate, 20))
                    .col(timestamp_with_time_zone(Reservation::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservation {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Section,
    PlotType,
    Consultation,
    Notes,
    AdminNotes,
    Status,
    ScheduledDate,
    CreatedAt,
}
