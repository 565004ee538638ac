use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::RegisterForEventRequest;
use crate::error::AppError;
use std::sync::Arc;

pub async fn register_for_event(
    State(state): State<Arc<AppState>>,
    AuthUser(principal): AuthUser,
    Path(event_id): Path<String>,
    payload: Option<Json<RegisterForEventRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let notes = payload.and_then(|Json(body)| body.notes);

    let registration = state
        .registration_service
        .register(&principal, &event_id, notes)
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}
