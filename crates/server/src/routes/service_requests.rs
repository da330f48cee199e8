//! Service requests: created from the public site, triaged in the admin console.

use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::service_request_service::{
    self, CreateServiceRequestInput, ServiceRequestView, StatusInput, UpdateServiceRequestInput,
};
use tracing::info;

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(
    get, path = "/api/admin/service-requests", tag = "service-requests",
    responses((status = 200, description = "Service requests", body = [crate::openapi::ServiceRequestDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ServiceRequestView>>, JsonApiError> {
    let rows = track("service_request", "list", service_request_service::list_service_requests(&state.db).await)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/admin/service-requests/{id}", tag = "service-requests",
    params(("id" = i32, Path, description = "Service request ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ServiceRequestDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ServiceRequestView>, JsonApiError> {
    Ok(Json(service_request_service::get_service_request(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/service-requests", tag = "service-requests",
    request_body = crate::openapi::ServiceRequestInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceRequestDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateServiceRequestInput>,
) -> Result<(StatusCode, Json<ServiceRequestView>), JsonApiError> {
    let created = track(
        "service_request",
        "create",
        service_request_service::create_service_request(&state.db, input).await,
    )?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/service-requests/{id}", tag = "service-requests",
    params(("id" = i32, Path, description = "Service request ID")),
    request_body = crate::openapi::ServiceRequestInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceRequestDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateServiceRequestInput>,
) -> Result<Json<ServiceRequestView>, JsonApiError> {
    let updated = track(
        "service_request",
        "update",
        service_request_service::update_service_request(&state.db, id, input).await,
    )?;
    Ok(Json(updated))
}

#[utoipa::path(
    patch, path = "/api/admin/service-requests/{id}/status", tag = "service-requests",
    params(("id" = i32, Path, description = "Service request ID")),
    request_body = crate::openapi::StatusDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceRequestDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<StatusInput>,
) -> Result<Json<ServiceRequestView>, JsonApiError> {
    let updated = track(
        "service_request",
        "update_status",
        service_request_service::update_status(&state.db, id, input).await,
    )?;
    info!(id, status = %updated.status, "service request status changed");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/admin/service-requests/{id}", tag = "service-requests",
    params(("id" = i32, Path, description = "Service request ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("service_request", "delete", service_request_service::delete_service_request(&state.db, id).await)?;
    Ok(Json(Message::new("Service request deleted")))
}
