//! Articles. The public listing hides rows with `isVisible = false`.

use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::{
    article_service::{self, ArticleView, CreateArticleInput, UpdateArticleInput},
    Visibility,
};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

async fn list(state: &AppState, visibility: Visibility) -> Result<Json<Vec<ArticleView>>, JsonApiError> {
    Ok(Json(track("article", "list", article_service::list_articles(&state.db, visibility).await)?))
}

#[utoipa::path(get, path = "/api/articles", tag = "articles", responses((status = 200, description = "Visible articles", body = [crate::openapi::ArticleDoc])))]
pub async fn list_public(State(state): State<AppState>) -> Result<Json<Vec<ArticleView>>, JsonApiError> {
    list(&state, Visibility::Public).await
}

#[utoipa::path(get, path = "/api/admin/articles", tag = "articles", responses((status = 200, description = "All articles", body = [crate::openapi::ArticleDoc])))]
pub async fn list_admin(State(state): State<AppState>) -> Result<Json<Vec<ArticleView>>, JsonApiError> {
    list(&state, Visibility::Admin).await
}

#[utoipa::path(
    post, path = "/api/admin/articles", tag = "articles",
    request_body = crate::openapi::ArticleDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ArticleDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateArticleInput>,
) -> Result<(StatusCode, Json<ArticleView>), JsonApiError> {
    let created = track("article", "create", article_service::create_article(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/articles/{id}", tag = "articles",
    params(("id" = i32, Path, description = "Article ID")),
    request_body = crate::openapi::ArticleDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ArticleDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateArticleInput>,
) -> Result<Json<ArticleView>, JsonApiError> {
    Ok(Json(track("article", "update", article_service::update_article(&state.db, id, input).await)?))
}

#[utoipa::path(
    delete, path = "/api/admin/articles/{id}", tag = "articles",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("article", "delete", article_service::delete_article(&state.db, id).await)?;
    Ok(Json(Message::new("Article deleted")))
}
