//! Create `article` table. Hidden articles are filtered out of the public listing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(pk_auto(Article::Id))
                    .col(string_len(Article::Title, 200).not_null())
                    .col(text(Article::Content).not_null())
                    .col(string_len_null(Article::Category, 50))
                    .col(string_len_null(Article::Date, 20))
                    .col(text_null(Article::Excerpt))
                    .col(string_len_null(Article::ReadTime, 20))
                    .col(boolean(Article::IsVisible).not_null().default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Article::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Article { Table, Id, Title, Content, Category, Date, Excerpt, ReadTime, IsVisible }
