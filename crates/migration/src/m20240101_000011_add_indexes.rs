use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Grave: filtered by section and name in the public search
        manager
            .create_index(
                Index::create()
                    .name("idx_grave_section")
                    .table(Grave::Table)
                    .col(Grave::Section)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_grave_name")
                    .table(Grave::Table)
                    .col(Grave::Name)
                    .to_owned(),
            )
            .await?;

        // ServiceRequest: index on grave_id for the cascade
        manager
            .create_index(
                Index::create()
                    .name("idx_service_request_grave")
                    .table(ServiceRequest::Table)
                    .col(ServiceRequest::GraveId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_faq_display_order")
                    .table(Faq::Table)
                    .col(Faq::DisplayOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_grave_section").table(Grave::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_grave_name").table(Grave::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_request_grave").table(ServiceRequest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_faq_display_order").table(Faq::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Grave { Table, Name, Section }

#[derive(DeriveIden)]
enum ServiceRequest { Table, GraveId }

#[derive(DeriveIden)]
enum Faq { Table, DisplayOrder }
