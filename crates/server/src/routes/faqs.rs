use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::faq_service::{self, FaqInput, FaqView};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(get, path = "/api/faqs", tag = "faqs", responses((status = 200, description = "FAQs by display order", body = [crate::openapi::FaqDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FaqView>>, JsonApiError> {
    Ok(Json(track("faq", "list", faq_service::list_faqs(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/admin/faqs", tag = "faqs",
    request_body = crate::openapi::FaqDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::FaqDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<FaqInput>,
) -> Result<(StatusCode, Json<FaqView>), JsonApiError> {
    let created = track("faq", "create", faq_service::create_faq(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/faqs/{id}", tag = "faqs",
    params(("id" = i32, Path, description = "FAQ ID")),
    request_body = crate::openapi::FaqDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::FaqDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<FaqInput>,
) -> Result<Json<FaqView>, JsonApiError> {
    Ok(Json(track("faq", "update", faq_service::update_faq(&state.db, id, input).await)?))
}

#[utoipa::path(
    delete, path = "/api/admin/faqs/{id}", tag = "faqs",
    params(("id" = i32, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("faq", "delete", faq_service::delete_faq(&state.db, id).await)?;
    Ok(Json(Message::new("FAQ deleted")))
}
