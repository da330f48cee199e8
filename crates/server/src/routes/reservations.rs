use axum::{extract::State, http::StatusCode, Json};
use common::{metrics::track, types::Message};
use service::reservation_service::{self, CreateReservationInput, ReservationView, UpdateReservationInput};

use crate::{errors::JsonApiError, extract::{ApiJson, ApiPath}, state::AppState};

#[utoipa::path(
    get, path = "/api/admin/reservations", tag = "reservations",
    responses((status = 200, description = "Reservations, newest first", body = [crate::openapi::ReservationDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ReservationView>>, JsonApiError> {
    Ok(Json(track("reservation", "list", reservation_service::list_reservations(&state.db).await)?))
}

#[utoipa::path(
    post, path = "/api/reservations", tag = "reservations",
    request_body = crate::openapi::ReservationDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ReservationDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateReservationInput>,
) -> Result<(StatusCode, Json<ReservationView>), JsonApiError> {
    let created = track("reservation", "create", reservation_service::create_reservation(&state.db, input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/admin/reservations/{id}", tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = crate::openapi::ReservationDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ReservationDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateReservationInput>,
) -> Result<Json<ReservationView>, JsonApiError> {
    let updated = track("reservation", "update", reservation_service::update_reservation(&state.db, id, input).await)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/admin/reservations/{id}", tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, JsonApiError> {
    track("reservation", "delete", reservation_service::delete_reservation(&state.db, id).await)?;
    Ok(Json(Message::new("Reservation deleted")))
}
