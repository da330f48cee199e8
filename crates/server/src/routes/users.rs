//! Admin user management. The `admin` account cannot be deleted or renamed.

use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::user_service::{self, CreateUserInput, UpdateUserInput, UserView};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(get, path = "/api/admin/users", tag = "users", responses((status = 200, description = "Users", body = [crate::openapi::UserDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, JsonApiError> {
    Ok(Json(track("user", "list", user_service::list_users(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/admin/users", tag = "users",
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Username taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateUserInput>,
) -> Result<(StatusCode, Json<UserView>), JsonApiError> {
    let created = track("user", "create", user_service::create_user(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Username taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateUserInput>,
) -> Result<Json<UserView>, JsonApiError> {
    Ok(Json(track("user", "update", user_service::update_user(&state.db, id, input).await)?))
}

#[utoipa::path(
    delete, path = "/api/admin/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Protected user", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("user", "delete", user_service::delete_user(&state.db, id).await)?;
    Ok(Json(Message::new("User deleted")))
}
