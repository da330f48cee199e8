use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::{repo::SeaOrmAuthRepository, service::AuthConfig, AuthService};

/// Shared handler state: the database handle and the login service built on it.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, login_token: impl Into<String>) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let auth = AuthService::new(repo, AuthConfig { login_token: login_token.into() });
        Self { db, auth: Arc::new(auth) }
    }
}
