//! Create `section` table (burial sections with a row/column grid size).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(pk_auto(Section::Id))
                    .col(string_len(Section::Name, 50).not_null())
                    .col(string_len_null(Section::Description, 200))
                    .col(integer(Section::Rows).not_null().default(10))
                    .col(integer(Section::Cols).not_null().default(10))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Section::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Section { Table, Id, Name, Description, Rows, Cols }
