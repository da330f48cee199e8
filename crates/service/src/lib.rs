//! Service layer providing business-oriented CRUD operations on top of models.
//! - Every operation takes an explicit `&DatabaseConnection`.
//! - Wire representations and input normalization live here, entity tables in `models`.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod normalize;
pub mod auth;
pub mod bootstrap;
pub mod dashboard_service;
pub mod user_service;
pub mod grave_service;
pub mod section_service;
pub mod service_request_service;
pub mod reservation_service;
pub mod article_service;
pub mod service_item_service;
pub mod contact_service;
pub mod faq_service;
pub mod category_service;
#[cfg(test)]
pub mod test_support;

/// Which audience a list operation serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Admin,
}
