//! Event catalog endpoints.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use seatwise_core::command::NewEventCommand;
use seatwise_core::model::{Event, EventId};

/// `POST /api/events` — create an event.
pub async fn create_event(
    State(state): State<AppState>,
    Json(command): Json<NewEventCommand>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.catalog.create(command).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /api/events` — list events, sorted by start time.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.catalog.list().await?))
}

/// `GET /api/events/:id` — look up one event.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.catalog.find_by_id(id).await?))
}
