use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod articles;
pub mod auth;
pub mod categories;
pub mod contact;
pub mod dashboard;
pub mod dev;
pub mod faqs;
pub mod graves;
pub mod reservations;
pub mod sections;
pub mod service_requests;
pub mod services;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Prometheus text exposition of the default registry.
pub async fn metrics() -> Result<impl IntoResponse, JsonApiError> {
    let body = common::metrics::encode_metrics().map_err(|e| {
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Metrics Error", Some(e.to_string()))
    })?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/login", post(auth::login))
        .route("/api/graves", get(graves::list).post(graves::create))
        .route("/api/graves/:id", get(graves::get).delete(graves::delete))
        .route("/api/sections", get(sections::list))
        .route("/api/service-requests", post(service_requests::create))
        .route("/api/reservations", post(reservations::create))
        .route("/api/articles", get(articles::list_public))
        .route("/api/services", get(services::list))
        .route("/api/contact", post(contact::create))
        .route("/api/faqs", get(faqs::list))
        .route("/api/categories", get(categories::list))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/dashboard", get(dashboard::show))
        .route("/api/admin/dev/seed-data", post(dev::seed_data))
        .route("/api/admin/graves", get(graves::list).post(graves::create))
        .route(
            "/api/admin/graves/:id",
            get(graves::get).put(graves::update).patch(graves::update).delete(graves::delete),
        )
        .route("/api/admin/sections", get(sections::list).post(sections::create))
        .route(
            "/api/admin/sections/:id",
            put(sections::update).patch(sections::update).delete(sections::delete),
        )
        .route("/api/admin/service-requests", get(service_requests::list))
        .route(
            "/api/admin/service-requests/:id",
            get(service_requests::get)
                .put(service_requests::update)
                .patch(service_requests::update)
                .delete(service_requests::delete),
        )
        .route("/api/admin/service-requests/:id/status", patch(service_requests::update_status))
        .route("/api/admin/reservations", get(reservations::list))
        .route(
            "/api/admin/reservations/:id",
            put(reservations::update).patch(reservations::update).delete(reservations::delete),
        )
        .route("/api/admin/articles", get(articles::list_admin).post(articles::create))
        .route(
            "/api/admin/articles/:id",
            put(articles::update).patch(articles::update).delete(articles::delete),
        )
        .route("/api/admin/services", get(services::list).post(services::create))
        .route(
            "/api/admin/services/:id",
            put(services::update).patch(services::update).delete(services::delete),
        )
        .route("/api/admin/contact", get(contact::list))
        .route(
            "/api/admin/contact/:id",
            put(contact::update).patch(contact::update).delete(contact::delete),
        )
        .route("/api/admin/faqs", get(faqs::list).post(faqs::create))
        .route("/api/admin/faqs/:id", put(faqs::update).patch(faqs::update).delete(faqs::delete))
        .route("/api/admin/categories", get(categories::list).post(categories::create))
        .route(
            "/api/admin/categories/:id",
            put(categories::update).patch(categories::update).delete(categories::delete),
        )
        .route("/api/admin/users", get(users::list).post(users::create))
        .route("/api/admin/users/:id", put(users::update).patch(users::update).delete(users::delete))
}

/// Build the full application router: JSON API, docs, and the static site as fallback.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: &str) -> Router {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let static_files = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    public_routes()
        .merge(admin_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
