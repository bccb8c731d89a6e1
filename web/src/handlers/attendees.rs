//! Attendee directory endpoints. Rate-limited; creation is audit-tracked.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use seatwise_core::command::NewAttendeeCommand;
use seatwise_core::model::Attendee;

/// `POST /api/attendees` — add an attendee.
pub async fn create_attendee(
    State(state): State<AppState>,
    Json(command): Json<NewAttendeeCommand>,
) -> Result<(StatusCode, Json<Attendee>), AppError> {
    let attendee = state.directory.register(command).await?;
    Ok((StatusCode::CREATED, Json(attendee)))
}

/// `GET /api/attendees` — list attendees.
pub async fn list_attendees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Attendee>>, AppError> {
    Ok(Json(state.directory.list().await?))
}
