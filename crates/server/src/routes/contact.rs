use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::contact_service::{self, ContactMessageView, CreateContactInput, UpdateContactInput};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(
    get, path = "/api/admin/contact", tag = "contact",
    responses((status = 200, description = "Messages, newest first", body = [crate::openapi::ContactMessageDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactMessageView>>, JsonApiError> {
    Ok(Json(track("contact_message", "list", contact_service::list_messages(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/contact", tag = "contact",
    request_body = crate::openapi::ContactMessageDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ContactMessageDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateContactInput>,
) -> Result<(StatusCode, Json<ContactMessageView>), JsonApiError> {
    let created = track("contact_message", "create", contact_service::create_message(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/contact/{id}", tag = "contact",
    params(("id" = i32, Path, description = "Message ID")),
    request_body = crate::openapi::ContactMessageDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ContactMessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateContactInput>,
) -> Result<Json<ContactMessageView>, JsonApiError> {
    let updated = track("contact_message", "update", contact_service::update_message(&state.db, id, input).await)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/admin/contact/{id}", tag = "contact",
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("contact_message", "delete", contact_service::delete_message(&state.db, id).await)?;
    Ok(Json(Message::new("Message deleted")))
}
