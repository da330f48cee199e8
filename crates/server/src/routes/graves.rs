//! Grave endpoints. Public and admin listings share one handler.

use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::grave_service::{self, CreateGraveInput, GraveFilter, GraveView, UpdateGraveInput};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath, ApiQuery}, state::AppState};

#[utoipa::path(
    get, path = "/api/graves", tag = "graves",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive name fragment"),
        ("section" = Option<String>, Query, description = "Section label, case-insensitive"),
        ("year" = Option<String>, Query, description = "Fragment of the death date")
    ),
    responses((status = 200, description = "Graves", body = [crate::openapi::GraveDoc]))
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<GraveFilter>,
) -> Result<Json<Vec<GraveView>>, JsonApiError> {
    let graves = track("grave", "list", grave_service::list_graves(&state.db, &filter).await)?;
    Ok(Json(graves))
}

#[utoipa::path(
    get, path = "/api/graves/{id}", tag = "graves",
    params(("id" = i32, Path, description = "Grave ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::GraveDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<GraveView>, JsonApiError> {
    Ok(Json(grave_service::get_grave(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/admin/graves", tag = "graves",
    request_body = crate::openapi::GraveInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::GraveDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateGraveInput>,
) -> Result<(StatusCode, Json<GraveView>), JsonApiError> {
    let grave = track("grave", "create", grave_service::create_grave(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(grave)))
}

#[utoipa::path(
    put, path = "/api/admin/graves/{id}", tag = "graves",
    params(("id" = i32, Path, description = "Grave ID")),
    request_body = crate::openapi::GraveInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::GraveDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateGraveInput>,
) -> Result<Json<GraveView>, JsonApiError> {
    let grave = track("grave", "update", grave_service::update_grave(&state.db, id, input).await)?;
    Ok(Json(grave))
}

#[utoipa::path(
    delete, path = "/api/admin/graves/{id}", tag = "graves",
    params(("id" = i32, Path, description = "Grave ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("grave", "delete", grave_service::delete_grave(&state.db, id).await)?;
    Ok(Json(Message::new("Grave deleted")))
}
