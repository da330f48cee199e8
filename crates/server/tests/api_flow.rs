use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::{routes, state::AppState};

async fn build_app() -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::in_memory()).await?;
    models::db::migrate(&db).await?;
    service::bootstrap::ensure_admin(&db, "admin123").await?;
    let state = AppState::new(db, "test-token");
    Ok(routes::build_router(state, CorsLayer::very_permissive(), "target/no-static"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, json))
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn login_with_seeded_admin() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "POST", "/api/login", Some(json!({"username": "admin", "password": "admin123"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["token"], "test-token");
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send(&app, "POST", "/api/login", Some(json!({"username": "admin", "password": "wrong"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn section_and_grave_lifecycle() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, section) = send(&app, "POST", "/api/admin/sections", Some(json!({"name": "A"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(section["rows"], 10);

    let (status, grave) = send(
        &app,
        "POST",
        "/api/admin/graves",
        Some(json!({"name": "Jan Kowalski", "section": "A", "row": 1, "deathDate": "2020-12-31"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(grave["coordinates"], "0,0");
    assert_eq!(grave["row"], "1");
    let id = grave["id"].as_i64().unwrap();

    let (_, list) = send(&app, "GET", "/api/graves", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["coordinates"], "0,0");

    let (status, renamed) = send(
        &app,
        "PUT",
        &format!("/api/admin/graves/{id}"),
        Some(json!({"name": "Jan Nowak", "coordinates": {"x": "3", "y": 4}})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Jan Nowak");
    assert_eq!(renamed["section"], "A");
    assert_eq!(renamed["coordinates"], "3,4");

    let (_, found) = send(&app, "GET", "/api/graves?name=nowak&section=a&year=2020", None).await?;
    assert_eq!(found.as_array().unwrap().len(), 1);
    let (_, none) = send(&app, "GET", "/api/admin/graves?name=kowalski", None).await?;
    assert!(none.as_array().unwrap().is_empty());

    let (status, body) = send(&app, "DELETE", &format!("/api/admin/graves/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    let (_, list) = send(&app, "GET", "/api/graves", None).await?;
    assert!(list.as_array().unwrap().is_empty());

    let (status, body) = send(&app, "DELETE", &format!("/api/admin/graves/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn service_request_flow() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, grave) = send(&app, "POST", "/api/graves", Some(json!({"name": "Anna"}))).await?;
    let grave_id = grave["id"].clone();

    let (status, created) = send(
        &app,
        "POST",
        "/api/service-requests",
        Some(json!({"graveId": grave_id, "serviceType": "cleaning", "services": ["Cleaning"], "total_cost": "150"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["services"], json!(["Cleaning"]));
    assert_eq!(created["status"], "pending");
    assert_eq!(created["discount"], 0.0);
    assert_eq!(created["total_cost"], 150.0);
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/admin/service-requests/{id}/status"),
        Some(json!({"status": "zakończone"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["serviceType"], "cleaning");

    let (status, _) = send(
        &app,
        "POST",
        "/api/service-requests",
        Some(json!({"graveId": 999, "serviceType": "cleaning"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/admin/service-requests", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (_, dashboard) = send(&app, "GET", "/api/admin/dashboard", None).await?;
    assert_eq!(dashboard["stats"]["requests"], 1);
    assert_eq!(dashboard["events"][0]["id"], format!("request_{id}"));
    assert_eq!(dashboard["events"][0]["type"], "request");
    Ok(())
}

#[tokio::test]
async fn admin_user_is_protected() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, users) = send(&app, "GET", "/api/admin/users", None).await?;
    let admin_id = users[0]["id"].as_i64().unwrap();
    assert_eq!(users[0]["username"], "admin");

    let (status, body) = send(&app, "DELETE", &format!("/api/admin/users/{admin_id}"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (status, _) = send(&app, "POST", "/api/admin/users", Some(json!({"username": "admin", "password": "x"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, created) = send(&app, "POST", "/api/admin/users", Some(json!({"username": "ola", "password": "pw"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "user");
    let (status, _) = send(&app, "POST", "/api/login", Some(json!({"username": "ola", "password": "pw"}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, users) = send(&app, "GET", "/api/admin/users", None).await?;
    assert_eq!(users.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/api/admin/faqs")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"], "Invalid JSON");

    let (status, body) = send(&app, "POST", "/api/admin/faqs", Some(json!({"question": "q"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn articles_respect_visibility() -> anyhow::Result<()> {
    let app = build_app().await?;
    send(&app, "POST", "/api/admin/articles", Some(json!({"title": "Visible", "content": "c"}))).await?;
    send(&app, "POST", "/api/admin/articles", Some(json!({"title": "Draft", "content": "c", "isVisible": false}))).await?;

    let (_, public) = send(&app, "GET", "/api/articles", None).await?;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["title"], "Visible");
    let (_, all) = send(&app, "GET", "/api/admin/articles", None).await?;
    assert_eq!(all.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_other_fields() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, svc) = send(
        &app,
        "POST",
        "/api/admin/services",
        Some(json!({"name": "Czyszczenie", "slug": "czyszczenie", "price": 100, "category": "primary"})),
    )
    .await?;
    let id = svc["id"].as_i64().unwrap();

    let (status, updated) = send(&app, "PATCH", &format!("/api/admin/services/{id}"), Some(json!({"price": "120.5"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 120.5);
    assert_eq!(updated["name"], "Czyszczenie");
    assert_eq!(updated["slug"], "czyszczenie");
    assert_eq!(updated["category"], "primary");

    let (status, _) = send(&app, "PUT", "/api/admin/services/999", Some(json!({"price": 1}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn metrics_are_exposed() -> anyhow::Result<()> {
    let app = build_app().await?;
    send(&app, "GET", "/api/faqs", None).await?;
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert!(String::from_utf8_lossy(&bytes).contains("cemetery_entity_operations_total"));
    Ok(())
}

#[tokio::test]
async fn public_grave_delete_route() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, grave) = send(&app, "POST", "/api/graves", Some(json!({"name": "X"}))).await?;
    let id = grave["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/api/graves/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    let (status, _) = send(&app, "GET", &format!("/api/graves/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn bad_path_and_query_get_json_errors() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "DELETE", "/api/admin/graves/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Path");
    assert!(body["detail"].is_string());

    let (status, body) = send(&app, "PATCH", "/api/admin/service-requests/1.5/status", Some(json!({"status": "pending"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Path");

    let (status, body) = send(&app, "GET", "/api/graves?name=a&name=b", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Query");
    Ok(())
}

#[tokio::test]
async fn seed_endpoint_fills_empty_tables_once() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "POST", "/api/admin/dev/seed-data", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("sample data loaded"));
    let (_, sections) = send(&app, "GET", "/api/sections", None).await?;
    let seeded = sections.as_array().unwrap().len();
    assert!(seeded > 0);

    let (status, body) = send(&app, "POST", "/api/admin/dev/seed-data", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "sample data loaded: 0 rows");
    let (_, sections) = send(&app, "GET", "/api/sections", None).await?;
    assert_eq!(sections.as_array().unwrap().len(), seeded);
    Ok(())
}
