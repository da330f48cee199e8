pub mod errors;
pub mod db;
pub mod user;
pub mod grave;
pub mod section;
pub mod service_request;
pub mod reservation;
pub mod article;
pub mod service_item;
pub mod contact_message;
pub mod faq;
pub mod category;

#[cfg(test)]
mod tests;
