use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::category_service::{self, CategoryInput, CategoryView};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(get, path = "/api/categories", tag = "categories", responses((status = 200, description = "Categories", body = [crate::openapi::CategoryDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryView>>, JsonApiError> {
    Ok(Json(track("category", "list", category_service::list_categories(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/admin/categories", tag = "categories",
    request_body = crate::openapi::CategoryDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CategoryDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<(StatusCode, Json<CategoryView>), JsonApiError> {
    let created = track("category", "create", category_service::create_category(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = crate::openapi::CategoryDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<Json<CategoryView>, JsonApiError> {
    Ok(Json(track("category", "update", category_service::update_category(&state.db, id, input).await)?))
}

#[utoipa::path(
    delete, path = "/api/admin/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("category", "delete", category_service::delete_category(&state.db, id).await)?;
    Ok(Json(Message::new("Category deleted")))
}
