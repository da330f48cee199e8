use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, state::AppState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::in_memory()).await?;
    models::db::migrate(&db).await?;
    service::bootstrap::ensure_admin(&db, "admin123").await?;
    service::bootstrap::seed_sample_data(&db).await?;

    let app = routes::build_router(AppState::new(db, "e2e-token"), CorsLayer::very_permissive(), "target/no-static");
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_site() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let sections: Value = client.get(format!("{}/api/sections", app.base_url)).send().await?.json().await?;
    let names: Vec<&str> = sections.as_array().unwrap().iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    let faqs: Value = client.get(format!("{}/api/faqs", app.base_url)).send().await?.json().await?;
    let orders: Vec<i64> = faqs.as_array().unwrap().iter().filter_map(|f| f["display_order"].as_i64()).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);

    let graves: Value = client.get(format!("{}/api/graves?name=kowal", app.base_url)).send().await?.json().await?;
    assert_eq!(graves[0]["name"], "Jan Kowalski");
    assert_eq!(graves[0]["coordinates"], "0,0");
    Ok(())
}

#[tokio::test]
async fn e2e_contact_and_reservation_reach_admin() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/contact", app.base_url))
        .json(&json!({"name": "Ewa", "email": "ewa@example.com", "message": "Dzień dobry"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let msg: Value = res.json().await?;
    assert_eq!(msg["status"], "unread");

    let res = client
        .post(format!("{}/api/reservations", app.base_url))
        .json(&json!({"name": "Piotr", "email": "p@example.com", "phone": "600100200", "consultation": "true", "scheduled_date": "2030-01-15"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let reservation: Value = res.json().await?;
    assert_eq!(reservation["status"], "pending");
    assert_eq!(reservation["consultation"], true);

    let id = msg["id"].as_i64().unwrap();
    let updated: Value = client
        .patch(format!("{}/api/admin/contact/{}", app.base_url, id))
        .json(&json!({"status": "read", "admin_notes": "odpisano"}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["status"], "read");
    assert_eq!(updated["message"], "Dzień dobry");

    let dashboard: Value = client.get(format!("{}/api/admin/dashboard", app.base_url)).send().await?.json().await?;
    assert_eq!(dashboard["stats"]["messages"], 1);
    assert_eq!(dashboard["stats"]["reservations"], 1);
    assert_eq!(dashboard["stats"]["graves"], 1);
    let kinds: Vec<&str> = dashboard["events"].as_array().unwrap().iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(kinds, vec!["reservation", "message"]);
    Ok(())
}
