use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::section_service::{self, CreateSectionInput, SectionView, UpdateSectionInput};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(get, path = "/api/sections", tag = "sections", responses((status = 200, description = "Sections", body = [crate::openapi::SectionDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SectionView>>, JsonApiError> {
    Ok(Json(track("section", "list", section_service::list_sections(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/admin/sections", tag = "sections",
    request_body = crate::openapi::SectionDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SectionDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSectionInput>,
) -> Result<(StatusCode, Json<SectionView>), JsonApiError> {
    let section = track("section", "create", section_service::create_section(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    put, path = "/api/admin/sections/{id}", tag = "sections",
    params(("id" = i32, Path, description = "Section ID")),
    request_body = crate::openapi::SectionDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SectionDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateSectionInput>,
) -> Result<Json<SectionView>, JsonApiError> {
    let section = track("section", "update", section_service::update_section(&state.db, id, input).await)?;
    Ok(Json(section))
}

#[utoipa::path(
    delete, path = "/api/admin/sections/{id}", tag = "sections",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("section", "delete", section_service::delete_section(&state.db, id).await)?;
    Ok(Json(Message::new("Section deleted")))
}
