//! Create `grave` table.
//! Coordinates live in two integer columns; the wire form `"x,y"` is rendered by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grave::Table)
                    .if_not_exists()
                    .col(pk_auto(Grave::Id))
                    .col(string_len(Grave::Name, 100).not_null())
                    .col(string_len_null(Grave::BirthDate, 20))
                    .col(string_len_null(Grave::DeathDate, 20))
                    .col(string_len_null(Grave::Section, 10))
                    .col(string_len_null(Grave::Row, 10))
                    .col(string_len_null(Grave::Plot, 10))
                    .col(integer(Grave::CoordX).not_null().default(0))
                    .col(integer(Grave::CoordY).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Grave::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Grave { Table, Id, Name, BirthDate, DeathDate, Section, Row, Plot, CoordX, CoordY }
