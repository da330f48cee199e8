use axum::{extract::State, Json};
use service::dashboard_service::{self, DashboardView};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(get, path = "/api/admin/dashboard", tag = "dashboard", responses((status = 200, description = "Counts and calendar events", body = crate::openapi::DashboardDoc)))]
pub async fn show(State(state): State<AppState>) -> Result<Json<DashboardView>, JsonApiError> {
    Ok(Json(dashboard_service::dashboard(&state.db).await?))
}
