//! Registration endpoints. Rate-limited; the registration flow is tracked.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use seatwise_core::command::RegistrationCommand;
use seatwise_core::model::Registration;

/// `POST /api/registrations` — register an attendee for an event.
pub async fn create_registration(
    State(state): State<AppState>,
    Json(command): Json<RegistrationCommand>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    let registration = state.registration.register(command).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// `GET /api/registrations` — list granted registrations.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, AppError> {
    Ok(Json(state.registration.list().await?))
}
