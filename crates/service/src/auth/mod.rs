//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Login checks a username/password pair against the argon2 hash stored on
//! the user row and hands back the configured static token.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
