use axum::{extract::State, Json};
use common::{metrics::track, types::Message};
use service::bootstrap;

use crate::{errors::JsonApiError, state::AppState};

/// Load sample rows into whichever content tables are still empty.
#[utoipa::path(
    post, path = "/api/admin/dev/seed-data", tag = "dev",
    responses((status = 200, description = "Sample data loaded", body = crate::openapi::MessageDoc))
)]
pub async fn seed_data(State(state): State<AppState>) -> Result<Json<Message>, JsonApiError> {
    let report = track("seed", "create", bootstrap::seed_sample_data(&state.db).await)?;
    Ok(Json(Message::new(format!("sample data loaded: {} rows", report.total()))))
}
