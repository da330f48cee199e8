//! Catalogue of services offered (cleaning, repairs, ...).

use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::service_item_service::{self, CreateServiceItemInput, ServiceItemView, UpdateServiceItemInput};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "Services", body = [crate::openapi::ServiceItemDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ServiceItemView>>, JsonApiError> {
    Ok(Json(track("service", "list", service_item_service::list_service_items(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/admin/services", tag = "services",
    request_body = crate::openapi::ServiceItemDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceItemDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateServiceItemInput>,
) -> Result<(StatusCode, Json<ServiceItemView>), JsonApiError> {
    let created = track("service", "create", service_item_service::create_service_item(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = crate::openapi::ServiceItemDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateServiceItemInput>,
) -> Result<Json<ServiceItemView>, JsonApiError> {
    let updated = track("service", "update", service_item_service::update_service_item(&state.db, id, input).await)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/admin/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("service", "delete", service_item_service::delete_service_item(&state.db, id).await)?;
    Ok(Json(Message::new("Service deleted")))
}
