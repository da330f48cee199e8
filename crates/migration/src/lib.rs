//! Migrator registering entity-specific migrations in dependency order.
//! Indexes and data fixes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_grave;
mod m20240101_000003_create_section;
mod m20240101_000004_create_service_request;
mod m20240101_000005_create_reservation;
mod m20240101_000006_create_article;
mod m20240101_000007_create_service;
mod m20240101_000008_create_contact_message;
mod m20240101_000009_create_faq;
mod m20240101_000010_create_category;
mod m20240101_000011_add_indexes;
mod m20240101_000012_normalize_request_status;

/// Legacy `service_request.status` spellings, lowercased, per canonical value.
/// Shared by the data migration and the read/write normalization.
pub const REQUEST_STATUS_ALIASES: &[(&str, &[&str])] = &[
    ("pending", &["pending", "oczekujące", "oczekujace", "nowe", "nowa", "new"]),
    (
        "in_progress",
        &["in_progress", "in progress", "in-progress", "w trakcie", "w_trakcie", "w toku"],
    ),
    ("completed", &["completed", "zakończone", "zakonczone", "done"]),
];

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_grave::Migration),
            Box::new(m20240101_000003_create_section::Migration),
            Box::new(m20240101_000004_create_service_request::Migration),
            Box::new(m20240101_000005_create_reservation::Migration),
            Box::new(m20240101_000006_create_article::Migration),
            Box::new(m20240101_000007_create_service::Migration),
            Box::new(m20240101_000008_create_contact_message::Migration),
            Box::new(m20240101_000009_create_faq::Migration),
            Box::new(m20240101_000010_create_category::Migration),
            // Indexes should always be applied after the tables exist
            Box::new(m20240101_000011_add_indexes::Migration),
            Box::new(m20240101_000012_normalize_request_status::Migration),
        ]
    }
}
